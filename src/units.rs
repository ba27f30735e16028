use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};

/// A measurement in PDF points, where 72 points make up 1 inch. All layout
/// and rendering in this crate happens in points.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Sum, From,
    Into, Display,
)]
pub struct Pt(pub f32);

/// A measurement in inches, convertible to [Pt]
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into, Display)]
pub struct In(pub f32);

/// A measurement in millimetres, convertible to [Pt]
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into, Display)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Pt {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Pt {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> In {
        In(value.0 / 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Mm {
        Mm(value.0 * 25.4 / 72.0)
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl Pt {
    /// The larger of two measurements
    pub fn max(self, other: Pt) -> Pt {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// The smaller of two measurements
    pub fn min(self, other: Pt) -> Pt {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        let pt: Pt = In(1.0).into();
        assert_eq!(pt, Pt(72.0));
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4);
    }

    #[test]
    fn point_arithmetic() {
        assert_eq!(Pt(10.0) + Pt(2.5), Pt(12.5));
        assert_eq!(Pt(10.0) - Pt(2.5), Pt(7.5));
        assert_eq!(Pt(10.0) * 2.0, Pt(20.0));
        assert_eq!(Pt(10.0) / 2.0, Pt(5.0));
        assert_eq!(Pt(3.0).max(Pt(4.0)), Pt(4.0));
    }
}
