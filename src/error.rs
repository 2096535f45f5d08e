use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single image conversion.
///
/// None of these abort a batch: the caller records the error for the input
/// that produced it and moves on to the next one.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode PDF: {0}")]
    Encoding(String),
}

/// Coarse category of a [`ConversionError`], for callers that only need to
/// branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidDimensions,
    UnsupportedFormat,
    IoFailure,
    EncodingFailure,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            ConversionError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ConversionError::Io { .. } => ErrorKind::IoFailure,
            ConversionError::Encoding(_) => ErrorKind::EncodingFailure,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
