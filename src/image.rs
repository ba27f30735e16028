use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::ReportError;
use image::{ColorType, DynamicImage};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::{Path, PathBuf};

enum ImageData {
    /// An RGB JPEG can be copied into the PDF byte-for-byte
    DirectlyEmbeddableJpeg(PathBuf),
    Decoded(DynamicImage),
}

/// A raster image, embedded once in the document and drawable any number of
/// times at any size. Share it with `Rc<Image>` between the report items
/// that draw it.
pub struct Image {
    data: ImageData,
    width: u32,
    height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, sniffing the format from the contents (or
    /// the extension, for TGA)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Image, ReportError> {
        let path = path.as_ref().to_owned();
        let is_tga = path
            .extension()
            .map(|ext| ext.to_ascii_lowercase() == "tga")
            .unwrap_or(false);

        let data = std::fs::read(&path)?;
        let format = if is_tga {
            image::ImageFormat::Tga
        } else {
            image::guess_format(&data)?
        };
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => Ok(Image {
                width: image.width(),
                height: image.height(),
                data: ImageData::DirectlyEmbeddableJpeg(path),
            }),
            _ => Ok(Self::from_dynamic(image)),
        }
    }

    /// Wrap an already-decoded image
    pub fn from_dynamic(image: DynamicImage) -> Image {
        Image {
            width: image.width(),
            height: image.height(),
            data: ImageData::Decoded(image),
        }
    }

    /// The image's natural width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The image's natural height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The image's natural size on the page, at one point per pixel
    pub fn natural_size(&self) -> (Pt, Pt) {
        (Pt(self.width as f32), Pt(self.height as f32))
    }

    /// The largest size with the image's aspect ratio that fits inside the
    /// given bounds without enlarging past the natural size
    pub fn scale_to_fit(&self, max_width: Pt, max_height: Pt) -> (Pt, Pt) {
        let (w, h) = self.natural_size();
        let scale = (max_width / w.0).min(max_height / h.0).min(Pt(1.0));
        (Pt(w.0 * scale.0), Pt(h.0 * scale.0))
    }

    fn encode(&self) -> Result<EncodeOutput, ReportError> {
        match &self.data {
            ImageData::DirectlyEmbeddableJpeg(path) => {
                let bytes = std::fs::read(path)?;
                Ok(EncodeOutput {
                    filter: Filter::DctDecode,
                    bytes,
                    mask: None,
                })
            }
            ImageData::Decoded(image) => {
                use image::GenericImageView;
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                Ok(EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                })
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), ReportError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode()?;

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_to_fit_shrinks_but_never_enlarges() {
        let image = Image::from_dynamic(DynamicImage::new_rgb8(200, 100));

        let (w, h) = image.scale_to_fit(Pt(100.0), Pt(100.0));
        assert_eq!((w, h), (Pt(100.0), Pt(50.0)));

        // plenty of room: stays at natural size
        let (w, h) = image.scale_to_fit(Pt(1000.0), Pt(1000.0));
        assert_eq!((w, h), (Pt(200.0), Pt(100.0)));
    }
}
