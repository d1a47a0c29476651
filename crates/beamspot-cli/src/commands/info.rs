use std::path::PathBuf;

use anyhow::{Context, Result};
use beamspot_core::io::load_raster_file;
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Input raster (PNG, BMP or TIFF)
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_raster_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let (min, max) = raster.intensity_range();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Bit depth:   {}", raster.bit_depth());
    println!("Intensity:   {} .. {}", min, max);

    Ok(())
}
