use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for RootLengthR
#[derive(Error, Debug)]
pub enum RootLengthError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cannot load image {path}: {source}")]
    ImageLoad {
        source: image::ImageError,
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {path}: {source}")]
    ConfigLoad {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Unusable scale factor {0} px/unit: the two reference markers must be placed apart")]
    DegenerateScale(f64),

    #[error("Calibration aborted before both reference markers were placed")]
    CalibrationAborted,

    #[error("Reference region is empty (image is {width}x{height})")]
    EmptyReferenceRegion { width: u32, height: u32 },

    #[error("Display error: {0}")]
    Display(String),
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, RootLengthError>;
