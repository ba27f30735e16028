use crate::colour::Colour;
use crate::font::Typeface;
use crate::units::Pt;
use std::rc::Rc;

/// A typeface/size pairing plus the colour and line-spacing settings used to
/// print text. This is the unit the renderer's text state is set from, and
/// the measuring side of the text fitting engine.
///
/// There are no bold/italic settings here; a separate typeface must be
/// loaded for each style of a family and wrapped in its own `FontMetrics`.
///
/// ```no_run
/// # use std::rc::Rc;
/// # use pdf_report::{Font, FontMetrics, Pt};
/// # let bytes: Vec<u8> = vec![];
/// let face: Rc<Font> = Rc::new(Font::load(bytes)?);
/// let main = FontMetrics::new(face.clone(), Pt(12.0));
/// let small = main.with_size(Pt(8.0));
/// # Ok::<(), pdf_report::ReportError>(())
/// ```
#[derive(Clone)]
pub struct FontMetrics {
    face: Rc<dyn Typeface>,
    size: Pt,
    colour: Option<Colour>,
    spacing_top: Pt,
    spacing_bottom: Pt,
    ascent: Pt,
    descent: Pt,
}

impl FontMetrics {
    /// Create metrics for the given typeface and font size, with the default
    /// half-point of extra spacing above and below each line
    pub fn new(face: Rc<dyn Typeface>, size: Pt) -> FontMetrics {
        let ascent = face.ascent(size);
        let descent = face.descent(size);
        FontMetrics {
            face,
            size,
            colour: None,
            spacing_top: Pt(0.5),
            spacing_bottom: Pt(0.5),
            ascent,
            descent,
        }
    }

    /// A copy of these metrics at a different font size; colour and line
    /// spacing carry over, the vertical extents are recomputed
    pub fn with_size(&self, size: Pt) -> FontMetrics {
        let mut copy = self.clone();
        copy.set_size(size);
        copy
    }

    /// Change the font size, recomputing the cached vertical extents
    pub fn set_size(&mut self, size: Pt) {
        self.size = size;
        self.ascent = self.face.ascent(size);
        self.descent = self.face.descent(size);
    }

    /// Set the colour text printed with these metrics is drawn in. When no
    /// colour is set, text uses whatever colour is active on the renderer.
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = Some(colour);
    }

    /// Control the amount of blank space above and below rendered text.
    /// When both values are zero, lines are spaced with the absolute
    /// minimum needed to keep the largest glyphs from overlapping.
    pub fn adjust_line_spacing(&mut self, top: Pt, bottom: Pt) {
        self.spacing_top = top;
        self.spacing_bottom = bottom;
    }

    /// Same as [adjust_line_spacing](Self::adjust_line_spacing), top only
    pub fn adjust_line_spacing_top(&mut self, top: Pt) {
        self.spacing_top = top;
    }

    /// Same as [adjust_line_spacing](Self::adjust_line_spacing), bottom only
    pub fn adjust_line_spacing_bottom(&mut self, bottom: Pt) {
        self.spacing_bottom = bottom;
    }

    /// Align this font to a common baseline with a larger font by growing
    /// this font's top line spacing until the baselines match. Extra space
    /// is only ever added to the smaller of the two fonts; if unsure which
    /// of two metrics is larger, call this both ways round.
    ///
    /// Text is positioned from its top-left corner, which makes vertical
    /// stacking easy but means two sizes placed side by side hang from the
    /// top rather than sitting on a shared baseline; this corrects that.
    pub fn align_baseline_to(&mut self, larger: &FontMetrics) {
        let above = larger.ascent() + larger.spacing_top();
        let deficit = above - self.ascent;
        if deficit > Pt(0.0) {
            self.spacing_top = deficit;
        }
    }

    pub fn face(&self) -> &Rc<dyn Typeface> {
        &self.face
    }

    pub fn size(&self) -> Pt {
        self.size
    }

    pub fn colour(&self) -> Option<Colour> {
        self.colour
    }

    /// The height above the baseline of the tallest glyphs, recomputed
    /// whenever the face or size change
    pub fn ascent(&self) -> Pt {
        self.ascent
    }

    /// The depth below the baseline of the deepest glyphs; zero or negative
    pub fn descent(&self) -> Pt {
        self.descent
    }

    pub fn spacing_top(&self) -> Pt {
        self.spacing_top
    }

    pub fn spacing_bottom(&self) -> Pt {
        self.spacing_bottom
    }

    /// The total height a line of text occupies at these settings,
    /// including the extra spacing above and below the glyphs
    pub fn line_height(&self) -> Pt {
        self.ascent - self.descent + self.spacing_top + self.spacing_bottom
    }

    /// The advance width of `text` at the current face and size
    pub fn width(&self, text: &str) -> Pt {
        self.face.text_width(text, self.size)
    }

    /// The advance width of a single character at the current face and size
    pub fn char_width(&self, ch: char) -> Pt {
        self.face.advance(ch, self.size)
    }

    /// Divide `text` into a head that fits inside `max_width` and the
    /// leftover tail, if any.
    ///
    /// When the whole string fits, the tail is [None]. Otherwise
    /// space-delimited tokens are accumulated into the head while the
    /// running width stays within `max_width`; the first token that would
    /// exceed it becomes the start of the tail. If even the first token
    /// overflows on its own, the head is a forced, hyphen-terminated break
    /// partway through that token.
    ///
    /// The splitting rules match [fit](Self::fit), which applies them
    /// repeatedly to produce whole lines.
    pub fn split(&self, text: &str, max_width: Pt) -> (String, Option<String>) {
        if self.width(text) <= max_width {
            return (text.to_string(), None);
        }

        let space_width = self.char_width(' ');
        let mut head = String::new();
        let mut line_width = Pt(0.0);
        let mut offset = 0usize;

        for token in text.split(' ') {
            let token_width = self.width(token);
            if line_width + token_width > max_width {
                if !head.is_empty() {
                    return (head, Some(text[offset..].to_string()));
                }
                // the very first token is wider than the line on its own
                let brk = self.forced_break(token, max_width);
                let mut broken = token[..brk].to_string();
                broken.push('-');
                return (broken, Some(text[offset + brk..].to_string()));
            }
            line_width += token_width + space_width;
            if !head.is_empty() {
                head.push(' ');
            }
            head.push_str(token);
            offset += token.len() + 1;
        }

        (text.to_string(), None)
    }

    /// Divide `text` into a series of lines that each fit inside
    /// `max_width` at the current face and size.
    ///
    /// Splitting happens at spaces where possible; a word too wide for a
    /// whole line is broken in the middle with a hyphen (which makes no
    /// attempt at correct hyphenation). Carriage returns and line feeds are
    /// hard breaks: each segment between them is fit independently and the
    /// results are concatenated in order. An empty input produces a single
    /// empty line.
    ///
    /// Every comparison is a strict "wider than", so a token measuring
    /// exactly `max_width` still fits on a line of its own.
    pub fn fit(&self, text: &str, max_width: Pt) -> Vec<String> {
        if text.is_empty() {
            return vec![String::new()];
        }
        let mut lines: Vec<String> = Vec::new();
        for segment in text.split(['\r', '\n']) {
            if segment.is_empty() {
                continue;
            }
            self.fit_segment(segment, max_width, &mut lines);
        }
        lines
    }

    fn fit_segment(&self, segment: &str, max_width: Pt, lines: &mut Vec<String>) {
        if self.width(segment) <= max_width {
            lines.push(segment.to_string());
            return;
        }

        let space_width = self.char_width(' ');
        let mut line = String::new();
        let mut line_width = Pt(0.0);

        for token in segment.split(' ') {
            let mut token = token.to_string();
            let mut token_width = self.width(&token);

            if line_width + token_width > max_width && line_width > Pt(0.0) {
                if token_width > max_width && line_width + max_width / 4.0 < max_width {
                    // the line is still mostly empty and the token needs a
                    // forced break anyway; pull the line back into the token
                    // rather than abandoning a nearly-blank line
                    token = format!("{line} {token}");
                    token_width = self.width(&token);
                } else {
                    lines.push(line.clone());
                }
                line_width = Pt(0.0);
                line.clear();
            }

            if token_width > max_width && line_width == Pt(0.0) {
                // too long for any line: break it down with trailing
                // hyphens until the remainder fits
                while token_width > max_width {
                    let brk = self.forced_break(&token, max_width);
                    let mut broken = token[..brk].to_string();
                    broken.push('-');
                    lines.push(broken);
                    token = token[brk..].to_string();
                    token_width = self.width(&token);
                }
            }

            if !token.is_empty() {
                line_width += token_width + space_width;
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&token);
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    /// The byte index to break `text` at so the part before the break plus
    /// a trailing hyphen stays within `max_width`. Always at least one
    /// character, so repeated breaking makes progress.
    fn forced_break(&self, text: &str, max_width: Pt) -> usize {
        let mut width = self.char_width('-');
        for (i, ch) in text.char_indices() {
            width += self.char_width(ch);
            if width > max_width {
                if i == 0 {
                    return ch.len_utf8();
                }
                return i;
            }
        }
        text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Typeface;

    /// Every character advances by the same fixed amount; ascent 8, descent
    /// -2 at size 10. Keeps the fitting arithmetic easy to reason about.
    struct FixedFace {
        advance: f32,
    }

    impl Typeface for FixedFace {
        fn ascent(&self, size: Pt) -> Pt {
            size * 0.8
        }

        fn descent(&self, size: Pt) -> Pt {
            size * -0.2
        }

        fn advance(&self, _ch: char, _size: Pt) -> Pt {
            Pt(self.advance)
        }
    }

    fn metrics(advance: f32) -> FontMetrics {
        FontMetrics::new(Rc::new(FixedFace { advance }), Pt(10.0))
    }

    #[test]
    fn line_height_combines_extents_and_spacing() {
        let mut m = metrics(5.0);
        m.adjust_line_spacing(Pt(1.0), Pt(2.0));
        // ascent 8, descent -2
        assert_eq!(m.line_height(), Pt(13.0));
    }

    #[test]
    fn baseline_alignment_grows_the_smaller_top_spacing() {
        let large = {
            let mut m = metrics(5.0);
            m.set_size(Pt(20.0));
            m
        };
        let mut small = metrics(5.0);
        small.align_baseline_to(&large);
        // large ascent 16 + spacing 0.5, small ascent 8
        assert_eq!(small.spacing_top(), Pt(8.5));

        // the other way round nothing changes: the deficit is negative
        let mut copy = large.clone();
        copy.align_baseline_to(&small);
        assert_eq!(copy.spacing_top(), Pt(0.5));
    }

    #[test]
    fn split_returns_whole_text_when_it_fits() {
        let m = metrics(10.0);
        let (head, tail) = m.split("abc def", Pt(70.0));
        assert_eq!(head, "abc def");
        assert!(tail.is_none());
    }

    #[test]
    fn split_breaks_between_tokens() {
        let m = metrics(10.0);
        // "aaa bbb ccc": by the time "ccc" is reached the running width is
        // 80 (two tokens and their trailing spaces), 80 + 30 > 100
        let (head, tail) = m.split("aaa bbb ccc", Pt(100.0));
        assert_eq!(head, "aaa bbb");
        assert_eq!(tail.as_deref(), Some("ccc"));
    }

    #[test]
    fn split_forces_a_hyphen_break_when_the_first_token_overflows() {
        let m = metrics(10.0);
        let (head, tail) = m.split("aaaaaaaaaa end", Pt(50.0));
        // four characters plus the hyphen measure exactly 50
        assert_eq!(head, "aaaa-");
        assert_eq!(tail.as_deref(), Some("aaaaaa end"));
    }

    #[test]
    fn fit_packs_greedily_and_preserves_token_order() {
        let m = metrics(10.0);
        let lines = m.fit("aa bb cc dd ee", Pt(50.0));
        assert_eq!(lines, vec!["aa bb", "cc dd", "ee"]);
        for line in &lines {
            assert!(m.width(line) <= Pt(50.0));
        }
    }

    #[test]
    fn fit_is_idempotent_over_its_own_lines() {
        let m = metrics(10.0);
        let lines = m.fit("aa bb cc dd ee", Pt(50.0));
        for line in &lines {
            assert_eq!(m.fit(line, Pt(50.0)), vec![line.clone()]);
        }
    }

    #[test]
    fn fit_force_breaks_an_oversized_token() {
        let m = metrics(10.0);
        // 25 chars at width 10 on a 100pt line: fragments of 9 chars + "-"
        let lines = m.fit(&"a".repeat(25), Pt(100.0));
        assert_eq!(lines, vec!["aaaaaaaaa-", "aaaaaaaaa-", "aaaaaaa"]);
        for line in &lines {
            assert!(m.width(line) <= Pt(100.0));
        }
        assert!(!lines.last().unwrap().ends_with('-'));
    }

    #[test]
    fn fit_token_exactly_at_max_width_is_not_broken() {
        let m = metrics(10.0);
        let lines = m.fit("aaaaa bbbbb", Pt(50.0));
        assert_eq!(lines, vec!["aaaaa", "bbbbb"]);
    }

    #[test]
    fn fit_combines_a_short_line_with_an_oversized_token() {
        let m = metrics(10.0);
        // "aa" leaves the line almost empty (20 + 25 < 100 - 100/4 holds),
        // so the oversized token absorbs it before force-breaking
        // nine characters plus the hyphen measure exactly 100
        let lines = m.fit(&format!("aa {}", "b".repeat(15)), Pt(100.0));
        assert_eq!(lines[0], "aa bbbbbb-");
        assert_eq!(lines[1], "bbbbbbbbb");
    }

    #[test]
    fn fit_treats_hard_breaks_as_separate_segments() {
        let m = metrics(10.0);
        let lines = m.fit("aa bb\ncc\r\ndd", Pt(50.0));
        assert_eq!(lines, vec!["aa bb", "cc", "dd"]);
    }

    #[test]
    fn fit_of_empty_input_is_one_empty_line() {
        let m = metrics(10.0);
        assert_eq!(m.fit("", Pt(50.0)), vec![String::new()]);
    }
}
