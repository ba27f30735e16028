use super::item::{Frame, ReportItem};
use crate::image::Image;
use crate::renderer::Renderer;
use crate::units::Pt;
use crate::ReportError;
use std::rc::Rc;

/// A placed image. Defaults to the image's natural size at one point per
/// pixel; the sizing methods preserve the aspect ratio unless told
/// otherwise. Several items can place the same `Rc<Image>` and the pixel
/// data is embedded once.
pub struct ImageItem {
    image: Rc<Image>,
    frame: Frame,
}

impl ImageItem {
    pub fn new(image: Rc<Image>) -> ImageItem {
        let (width, height) = image.natural_size();
        ImageItem {
            image,
            frame: Frame::new(width, height),
        }
    }

    /// Shrink the image if needed so it fits within the given bounds,
    /// keeping the aspect ratio and never enlarging past natural size
    pub fn scale_to_fit(&mut self, max_width: Pt, max_height: Pt) {
        let (width, height) = self.image.scale_to_fit(max_width, max_height);
        self.frame.width = width;
        self.frame.height = height;
    }

    /// Set the display width, scaling the height to match
    pub fn set_display_width(&mut self, width: Pt) {
        let (natural_width, natural_height) = self.image.natural_size();
        self.frame.width = width;
        self.frame.height = Pt(natural_height.0 * width.0 / natural_width.0);
    }

    /// Set the display height, scaling the width to match
    pub fn set_display_height(&mut self, height: Pt) {
        let (natural_width, natural_height) = self.image.natural_size();
        self.frame.height = height;
        self.frame.width = Pt(natural_width.0 * height.0 / natural_height.0);
    }

    /// Set both dimensions exactly, ignoring the aspect ratio
    pub fn resize(&mut self, width: Pt, height: Pt) {
        self.frame.width = width;
        self.frame.height = height;
    }
}

impl ReportItem for ImageItem {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn print(&self, renderer: &mut dyn Renderer) -> Result<(), ReportError> {
        renderer.draw_image(&self.image, self.frame.width, self.frame.height);
        Ok(())
    }
}
