//! Converts raster images into single-page PDF documents.
//!
//! Each page is sized to its image (one pixel per point) and the image is
//! fitted on it preserving its aspect ratio. See [`convert_all`].

pub mod converter;
pub mod error;
pub mod fit;
pub mod image_reader;
pub mod pdf_writer;
pub mod utils;

pub use converter::{convert_all, convert_image, ConversionOutcome};
pub use error::{ConversionError, ErrorKind};
pub use fit::{compute_fit, FittedRect, ImageDimensions, PageSize};

/// Resolution handed to printpdf so that one image pixel spans one point.
pub const IMAGE_DPI: f32 = 72.0;
pub const LAYER_NAME: &str = "Layer 1";
pub const OUTPUT_EXTENSION: &str = "pdf";
