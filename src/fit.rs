//! Page sizing and aspect-ratio preserving placement.
//!
//! Everything here is plain geometry in PDF points. One source pixel maps to
//! one point, so a page built from [`ImageDimensions`] has the same numeric
//! size as the image.

use crate::error::{ConversionError, Result};

/// Intrinsic size of a source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

/// Size of the single page an image is placed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

/// Rectangle on the page where the image is drawn, origin at the lower-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        check_positive(width, height)?;
        Ok(ImageDimensions { width, height })
    }
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        check_positive(width, height)?;
        Ok(PageSize { width, height })
    }

    /// Places `image` inside this page, scaling it down if needed.
    pub fn fit(&self, image: ImageDimensions) -> Result<FittedRect> {
        compute_fit(image.width, image.height, self.width, self.height)
    }
}

impl From<ImageDimensions> for PageSize {
    fn from(dims: ImageDimensions) -> Self {
        PageSize {
            width: dims.width,
            height: dims.height,
        }
    }
}

/// Fits an `image_width` x `image_height` image inside a page, preserving its
/// aspect ratio and centering it.
///
/// Images that already fit are never scaled up. When the image's aspect ratio
/// equals the page's, the width branch is taken.
pub fn compute_fit(
    image_width: f64,
    image_height: f64,
    page_width: f64,
    page_height: f64,
) -> Result<FittedRect> {
    check_positive(image_width, image_height)?;
    check_positive(page_width, page_height)?;

    let (width, height) = if image_width <= page_width && image_height <= page_height {
        (image_width, image_height)
    } else {
        let aspect_ratio = image_width / image_height;
        if aspect_ratio >= page_width / page_height {
            (page_width, page_width / aspect_ratio)
        } else {
            (page_height * aspect_ratio, page_height)
        }
    };

    Ok(FittedRect {
        x: (page_width - width) / 2.0,
        y: (page_height - height) / 2.0,
        width,
        height,
    })
}

fn check_positive(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ConversionError::InvalidDimensions { width, height })
    }
}
