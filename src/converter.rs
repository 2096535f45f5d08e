use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::error::Result;
use crate::image_reader::read_image;
use crate::pdf_writer::{compose_pdf, write_pdf};
use crate::utils::{display_name, output_path_for};

/// Result of converting one input path.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub result: Result<PathBuf>,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Converts one image into `<dir>/<name>.pdf` and returns the output path.
pub fn convert_image(image_path: &Path) -> Result<PathBuf> {
    let pdf_path = output_path_for(image_path)?;
    let name = display_name(image_path);

    let source = read_image(image_path)?;
    let bytes = compose_pdf(&source, &name)?;
    write_pdf(&bytes, &pdf_path)?;

    Ok(pdf_path)
}

/// Converts every input in order. A failing input is logged and recorded,
/// and the remaining inputs are still processed.
pub fn convert_all<P: AsRef<Path>>(image_paths: &[P]) -> Vec<ConversionOutcome> {
    debug!("Converting {} image(s)", image_paths.len());

    image_paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let result = convert_image(path);
            log_outcome(path, &result);
            ConversionOutcome {
                input: path.to_path_buf(),
                result,
            }
        })
        .collect()
}

fn log_outcome(path: &Path, result: &Result<PathBuf>) {
    match result {
        Ok(pdf_path) => debug!(
            "Image \"{}\" converted to PDF successfully: {}",
            display_name(path),
            pdf_path.display()
        ),
        Err(e) => error!("Error converting image \"{}\": {}", path.display(), e),
    }
}
