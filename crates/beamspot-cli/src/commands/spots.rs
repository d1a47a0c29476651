use std::path::PathBuf;

use anyhow::{Context, Result};
use beamspot_core::dataset::{parse_date, DatasetQuery, DatasetTable};
use beamspot_core::spots::SpotRegistry;
use chrono::NaiveDate;
use clap::Args;

use crate::summary::print_spot_table;

#[derive(Args)]
pub struct SpotsArgs {
    /// Dataset table (TOML with a [[rows]] array)
    pub dataset: PathBuf,

    /// Acquisition date, YYYY-MM-DD or DD/MM/YYYY (defaults to the newest)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Beam energy (defaults to the highest on the chosen date)
    #[arg(long)]
    pub energy: Option<f64>,

    /// Inspector config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub(crate) fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("unrecognised date \"{s}\""))
}

pub fn run(args: &SpotsArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let table = DatasetTable::load(&args.dataset)
        .with_context(|| format!("Failed to read dataset {}", args.dataset.display()))?;

    let selection = table
        .select(args.date, args.energy)
        .context("Dataset selection failed")?;
    let registry = SpotRegistry::from_layout(
        config.spots.iter(),
        config.spots.viewing_range,
        &selection.measured_positions(),
    )?;

    print_spot_table(&selection, &registry);
    Ok(())
}
