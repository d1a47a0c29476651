use std::path::PathBuf;

use anyhow::{Context, Result};
use beamspot_core::geometry::Point;
use beamspot_core::io::load_raster_file;
use beamspot_core::profile::stats::to_csv;
use beamspot_core::profile::{sample, ProfileStats};
use clap::Args;

use crate::summary::print_profile_summary;

#[derive(Args)]
pub struct ProfileArgs {
    /// Input raster (PNG, BMP or TIFF)
    pub file: PathBuf,

    /// Start point as "x,y" (defaults to the config's profile start)
    #[arg(long, value_parser = parse_point)]
    pub from: Option<Point>,

    /// End point as "x,y" (defaults to the config's profile end)
    #[arg(long, value_parser = parse_point)]
    pub to: Option<Point>,

    /// Inspector config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the samples as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the profile as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in \"{s}\": {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in \"{s}\": {e}"))?;
    Ok(Point::new(x, y))
}

pub fn run(args: &ProfileArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let p1 = args.from.unwrap_or(config.profile.start);
    let p2 = args.to.unwrap_or(config.profile.end);

    let raster = load_raster_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let profile = sample(&raster, p1, p2).context("Profile sampling failed")?;
    let stats = ProfileStats::compute(&profile);

    if let Some(ref path) = args.csv {
        std::fs::write(path, to_csv(&profile))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if args.json {
        let doc = serde_json::json!({ "profile": profile, "stats": stats });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_profile_summary(&args.file, &profile, &stats);
        if let Some(ref path) = args.csv {
            println!("  CSV written to {}", path.display());
        }
    }

    Ok(())
}
