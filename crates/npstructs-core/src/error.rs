use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty frame sequence")]
    EmptySequence,

    #[error("Frame {frame} has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        frame: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Frame contains {count} non-finite pixel(s)")]
    NonFinitePixels { count: usize },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Frame {frame} failed: {message}")]
    Worker { frame: usize, message: String },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl LocateError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LocateError>;
