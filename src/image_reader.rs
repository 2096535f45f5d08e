use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};
use log::debug;

use crate::error::{ConversionError, Result};
use crate::fit::ImageDimensions;
use crate::utils::{EmbeddableFormat, SourceImage};

pub fn read_image(path: &Path) -> Result<SourceImage> {
    debug!("Reading image file: {}", path.display());
    let bytes = fs::read(path).map_err(|e| ConversionError::io(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let (format, dimensions) = probe(&bytes)?;
    debug!(
        "Detected {:?} image, {}x{}",
        format, dimensions.width, dimensions.height
    );

    Ok(SourceImage {
        bytes,
        format,
        dimensions,
    })
}

/// Sniffs the format from magic bytes and reads the header dimensions.
///
/// Only formats the PDF writer can embed are accepted, so the dimensions
/// always describe the same bytes that end up in the document.
pub fn probe(bytes: &[u8]) -> Result<(EmbeddableFormat, ImageDimensions)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    let format = match reader.format() {
        Some(ImageFormat::Png) => EmbeddableFormat::Png,
        Some(ImageFormat::Jpeg) => EmbeddableFormat::Jpeg,
        Some(other) => {
            let name = other.extensions_str().first().copied().unwrap_or("unknown");
            return Err(ConversionError::UnsupportedFormat(format!(
                "{} images cannot be embedded, only PNG and JPEG",
                name
            )));
        }
        None => {
            return Err(ConversionError::UnsupportedFormat(
                "unrecognized image data".to_string(),
            ))
        }
    };

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))?;

    let dimensions = ImageDimensions::new(f64::from(width), f64::from(height))?;
    Ok((format, dimensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::{DynamicImage, RgbImage};

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn probes_png() {
        let (format, dims) = probe(&encode(30, 20, ImageFormat::Png)).unwrap();
        assert_eq!(format, EmbeddableFormat::Png);
        assert_eq!(dims, ImageDimensions::new(30.0, 20.0).unwrap());
    }

    #[test]
    fn probes_jpeg() {
        let (format, dims) = probe(&encode(16, 48, ImageFormat::Jpeg)).unwrap();
        assert_eq!(format, EmbeddableFormat::Jpeg);
        assert_eq!(dims.width, 16.0);
        assert_eq!(dims.height, 48.0);
    }

    #[test]
    fn decodable_but_not_embeddable() {
        let err = probe(&encode(8, 8, ImageFormat::Bmp)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains("bmp"));
    }

    #[test]
    fn garbage_is_unsupported() {
        let err = probe(b"definitely not an image").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn truncated_png_header() {
        let png = encode(10, 10, ImageFormat::Png);
        let err = probe(&png[..12]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn missing_file_is_io_failure() {
        let err = read_image(Path::new("/nonexistent/dir/img.png")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }
}
