use std::path::{Path, PathBuf};

use crate::error::{ConversionError, Result};
use crate::fit::ImageDimensions;
use crate::OUTPUT_EXTENSION;

/// Raster formats that the PDF writer can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddableFormat {
    Png,
    Jpeg,
}

/// A decoded-enough input: its bytes, the format they were sniffed as and
/// the pixel dimensions read from the header.
#[derive(Debug)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub format: EmbeddableFormat,
    pub dimensions: ImageDimensions,
}

/// `dir/name.ext` becomes `dir/name.ext.pdf`.
pub fn output_path_for(input: &Path) -> Result<PathBuf> {
    let name = input.file_name().ok_or_else(|| {
        ConversionError::io(
            input,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    let mut file_name = name.to_os_string();
    file_name.push(".");
    file_name.push(OUTPUT_EXTENSION);

    Ok(input.with_file_name(file_name))
}

/// Name used in log lines and as the PDF title.
pub fn display_name(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
