use std::path::PathBuf;

use anyhow::{Context, Result};
use beamspot_core::dataset::{DatasetQuery, DatasetTable};
use beamspot_core::events::{HostEvent, Notification, NotificationKind};
use beamspot_core::io::load_raster_file;
use beamspot_core::session::Inspector;
use beamspot_core::spots::SpotRegistry;
use chrono::NaiveDate;
use clap::Args;
use serde::Deserialize;
use tracing::debug;

use super::spots::parse_date_arg;

#[derive(Args)]
pub struct ReplayArgs {
    /// Initial raster (PNG, BMP or TIFF)
    pub file: PathBuf,

    /// JSON array of host events
    pub events: PathBuf,

    /// Inspector config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dataset table supplying measured spot positions
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Acquisition date to select from the dataset (defaults to the newest)
    #[arg(long, requires = "dataset", value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Beam energy to select from the dataset (defaults to the highest)
    #[arg(long, requires = "dataset")]
    pub energy: Option<f64>,
}

/// A host event, or a raster file to upload by path.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReplayStep {
    Host(HostEvent),
    Upload { upload: PathBuf },
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let raster = load_raster_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let text = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read {}", args.events.display()))?;
    let steps: Vec<ReplayStep> = serde_json::from_str(&text).context("Invalid event list")?;

    debug!(steps = steps.len(), "Replaying host events");

    let mut inspector = Inspector::new(&config, raster)?;
    if let Some(dataset) = &args.dataset {
        let table = DatasetTable::load(dataset)
            .with_context(|| format!("Failed to read dataset {}", dataset.display()))?;
        let selection = table
            .select(args.date, args.energy)
            .context("Dataset selection failed")?;
        inspector = inspector.with_measurements(&selection.measured_positions())?;
        print_spots(inspector.spots());
    }
    if let Some(reference) = inspector.reference_image() {
        println!("reference image: {}", reference.display());
    }

    for kind in NotificationKind::ALL {
        inspector.subscribe(kind, print_notification);
    }

    for (i, step) in steps.into_iter().enumerate() {
        let event = match step {
            ReplayStep::Host(event) => event,
            ReplayStep::Upload { upload } => HostEvent::FileUploaded {
                bytes: std::fs::read(&upload)
                    .with_context(|| format!("Failed to read {}", upload.display()))?,
            },
        };
        println!("[{i}] {}", describe(&event));
        // Rejections were already printed through the Failed subscriber
        let _ = inspector.handle(event);
    }

    Ok(())
}

fn describe(event: &HostEvent) -> String {
    match event {
        HostEvent::FileUploaded { bytes } => format!("file_uploaded ({} bytes)", bytes.len()),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
    }
}

fn print_notification(n: &Notification<'_>) {
    match n {
        Notification::OverlaysChanged(overlays) => {
            for o in overlays.iter() {
                let b = o.rectangle.points;
                println!(
                    "    overlay {:<6} x {:>8.2}..{:<8.2} y {:>8.2}..{:<8.2}",
                    o.id.as_str(),
                    b[0].x,
                    b[2].x,
                    b[0].y,
                    b[2].y
                );
            }
        }
        Notification::ProfileChanged(profile) => {
            let [p1, p2] = profile.handles;
            println!(
                "    profile {} samples ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                profile.len(),
                p1.x,
                p1.y,
                p2.x,
                p2.y
            );
        }
        Notification::ImageReplaced(raster) => {
            println!("    raster {}x{}", raster.width(), raster.height());
        }
        Notification::SpotsChanged(registry) => print_spots(registry),
        Notification::Failed(e) => println!("    rejected: {e}"),
    }
}

fn print_spots(registry: &SpotRegistry) {
    for spot in registry.iter() {
        let (dx, dy) = spot.offset();
        match spot.region_bounds() {
            Ok(b) => println!(
                "    spot {:<4} offset ({:+.2}, {:+.2}) region x {:.2}..{:.2} y {:.2}..{:.2}",
                spot.label,
                dx,
                dy,
                b.x_start(),
                b.x_end(),
                b.y_start(),
                b.y_end()
            ),
            Err(_) => println!("    spot {:<4} offset ({:+.2}, {:+.2})", spot.label, dx, dy),
        }
    }
}
