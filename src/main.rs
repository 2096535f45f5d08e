use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use img2pdf::convert_all;
use img2pdf::utils::display_name;
use log::{info, warn};

/// Convert each image into a single-page PDF written next to it.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// PNG or JPEG files to convert
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("Starting conversion of {} image(s)", args.images.len());

    let outcomes = convert_all(&args.images);

    let mut stdout = io::stdout().lock();
    for outcome in outcomes.iter().filter(|o| o.is_success()) {
        writeln!(
            stdout,
            "Image \"{}\" converted to PDF successfully!",
            display_name(&outcome.input)
        )
        .context("Failed to write to stdout")?;
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        warn!("{} of {} conversion(s) failed", failed, outcomes.len());
    } else {
        info!("Conversion completed successfully");
    }

    Ok(())
}
