use std::fs;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use log::debug;
use printpdf::image_crate::codecs::jpeg::JpegDecoder as PrintPdfJpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder as PrintPdfPngDecoder;
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Pt};
use tempfile::NamedTempFile;

use crate::error::{ConversionError, Result};
use crate::fit::{FittedRect, PageSize};
use crate::utils::{EmbeddableFormat, SourceImage};
use crate::{IMAGE_DPI, LAYER_NAME};

/// Builds a one-page document sized to `source` with the image fitted on it,
/// and returns the serialized PDF.
pub fn compose_pdf(source: &SourceImage, title: &str) -> Result<Vec<u8>> {
    let page = PageSize::from(source.dimensions);
    let rect = page.fit(source.dimensions)?;
    debug!(
        "Page {}x{} pt, image at ({}, {}) size {}x{}",
        page.width, page.height, rect.x, rect.y, rect.width, rect.height
    );

    let (doc, page1, layer1) = PdfDocument::new(
        title,
        Mm::from(Pt(page.width as f32)),
        Mm::from(Pt(page.height as f32)),
        LAYER_NAME,
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let printpdf_image = embed(source)?;
    let embedded_width = printpdf_image.image.width.0;
    let embedded_height = printpdf_image.image.height.0;
    if embedded_width as f64 != source.dimensions.width
        || embedded_height as f64 != source.dimensions.height
    {
        return Err(ConversionError::Encoding(format!(
            "decoder produced {}x{} pixels, header declared {}x{}",
            embedded_width, embedded_height, source.dimensions.width, source.dimensions.height
        )));
    }

    printpdf_image.add_to_layer(layer, image_transform(&rect, source));

    debug!("Serializing PDF");
    doc.save_to_bytes()
        .map_err(|e| ConversionError::Encoding(e.to_string()))
}

fn embed(source: &SourceImage) -> Result<Image> {
    let mut reader = Cursor::new(&source.bytes);
    let decoded = match source.format {
        EmbeddableFormat::Png => PrintPdfPngDecoder::new(&mut reader).and_then(Image::try_from),
        EmbeddableFormat::Jpeg => PrintPdfJpegDecoder::new(&mut reader).and_then(Image::try_from),
    };
    decoded.map_err(|e| ConversionError::UnsupportedFormat(e.to_string()))
}

// At IMAGE_DPI one pixel is one point, so the scale is the fitted size over
// the pixel size.
fn image_transform(rect: &FittedRect, source: &SourceImage) -> ImageTransform {
    ImageTransform {
        translate_x: Some(Mm::from(Pt(rect.x as f32))),
        translate_y: Some(Mm::from(Pt(rect.y as f32))),
        scale_x: Some((rect.width / source.dimensions.width) as f32),
        scale_y: Some((rect.height / source.dimensions.height) as f32),
        dpi: Some(IMAGE_DPI),
        ..Default::default()
    }
}

/// Writes `bytes` to `pdf_path` through a temporary sibling file, so a failed
/// write never leaves a truncated PDF behind.
pub fn write_pdf(bytes: &[u8], pdf_path: &Path) -> Result<()> {
    let dir = match pdf_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    debug!("Saving PDF to {}", pdf_path.display());
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConversionError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| ConversionError::io(pdf_path, e))?;
    }
    tmp.persist(pdf_path)
        .map_err(|e| ConversionError::io(pdf_path, e.error))?;

    let pdf_size = fs::metadata(pdf_path)
        .map_err(|e| ConversionError::io(pdf_path, e))?
        .len();
    debug!("PDF saved successfully. File size: {} bytes", pdf_size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fit::ImageDimensions;
    use image::{DynamicImage, ImageFormat, RgbImage};

    fn source(width: u32, height: u32, format: ImageFormat) -> SourceImage {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        SourceImage {
            bytes,
            format: match format {
                ImageFormat::Png => EmbeddableFormat::Png,
                _ => EmbeddableFormat::Jpeg,
            },
            dimensions: ImageDimensions::new(f64::from(width), f64::from(height)).unwrap(),
        }
    }

    #[test]
    fn composes_png() {
        let bytes = compose_pdf(&source(40, 30, ImageFormat::Png), "test").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn composes_jpeg() {
        let bytes = compose_pdf(&source(24, 64, ImageFormat::Jpeg), "test").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn header_dimensions_must_match_decoder() {
        let mut src = source(40, 30, ImageFormat::Png);
        src.dimensions = ImageDimensions::new(80.0, 30.0).unwrap();
        let err = compose_pdf(&src, "test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingFailure);
    }

    #[test]
    fn corrupt_body_is_unsupported() {
        let mut src = source(40, 30, ImageFormat::Png);
        src.bytes.truncate(20);
        let err = compose_pdf(&src, "test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn transform_scales_to_fitted_rect() {
        let src = source(40, 30, ImageFormat::Png);
        let rect = FittedRect {
            x: 5.0,
            y: 0.0,
            width: 20.0,
            height: 15.0,
        };
        let t = image_transform(&rect, &src);
        assert_eq!(t.scale_x, Some(0.5));
        assert_eq!(t.scale_y, Some(0.5));
        assert_eq!(t.dpi, Some(IMAGE_DPI));
    }

    #[test]
    fn write_replaces_target_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        write_pdf(b"%PDF-first", &target).unwrap();
        write_pdf(b"%PDF-second", &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"%PDF-second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.pdf");
        let err = write_pdf(b"%PDF-", &target).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(!target.exists());
    }
}
