pub mod config;
pub mod info;
pub mod profile;
pub mod replay;
pub mod spots;

use std::path::Path;

use anyhow::{Context, Result};
use beamspot_core::config::InspectorConfig;

/// Load the config at `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<InspectorConfig> {
    match path {
        Some(p) => InspectorConfig::load(p)
            .with_context(|| format!("Failed to read config {}", p.display())),
        None => Ok(InspectorConfig::default()),
    }
}
