use thiserror::Error;

/// All errors that the crate can generate. Errors are never downgraded or
/// swallowed inside the layout core; anything raised during the build or
/// print phases propagates out of the entry point that triggered it.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [ttf_parser](owned_ttf_parser) failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    /// `restore_state` was called with no matching `save_state`. This is a
    /// caller logic error and is surfaced immediately.
    #[error("restore_state called with no saved state on the stack")]
    StateNotSaved,

    /// Text was drawn through a [Typeface](crate::Typeface) that has no
    /// parsed font face behind it. Metrics-only typefaces can measure text
    /// but cannot be embedded in a PDF.
    #[error("the active typeface is metrics-only and cannot be drawn")]
    MetricsOnlyTypeface,

    /// Text was drawn before any font metrics were set on the renderer
    #[error("no font metrics have been set on the renderer")]
    NoActiveFont,
}
