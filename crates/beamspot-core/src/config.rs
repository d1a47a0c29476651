use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PROFILE_END, DEFAULT_PROFILE_START, DEFAULT_SPOT_COLUMNS, DEFAULT_SPOT_LABELS,
    DEFAULT_SPOT_ROWS, DEFAULT_VIEWING_RANGE,
};
use crate::error::{BeamspotError, Result};
use crate::geometry::{Bounds, Point};
use crate::viewport::{Viewport, ViewportId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Decorative image shown next to the profile, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<PathBuf>,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub spots: SpotLayoutConfig,
    #[serde(default = "default_viewports")]
    pub viewports: Vec<ViewportConfig>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            reference_image: None,
            profile: ProfileConfig::default(),
            spots: SpotLayoutConfig::default(),
            viewports: default_viewports(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub start: Point,
    pub end: Point,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_PROFILE_START.into(),
            end: DEFAULT_PROFILE_END.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotLayoutConfig {
    /// Half-width of the region around each expected position.
    pub viewing_range: f64,
    pub expected: Vec<ExpectedSpot>,
}

impl Default for SpotLayoutConfig {
    fn default() -> Self {
        let expected = DEFAULT_SPOT_ROWS
            .iter()
            .flat_map(|&y| DEFAULT_SPOT_COLUMNS.iter().map(move |&x| Point::new(x, y)))
            .zip(DEFAULT_SPOT_LABELS)
            .map(|(position, label)| ExpectedSpot {
                label: label.to_owned(),
                position,
            })
            .collect();
        Self {
            viewing_range: DEFAULT_VIEWING_RANGE,
            expected,
        }
    }
}

impl SpotLayoutConfig {
    pub fn position(&self, label: &str) -> Option<Point> {
        self.expected
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.expected.iter().map(|s| (s.label.as_str(), s.position))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpectedSpot {
    pub label: String,
    pub position: Point,
}

/// A viewport to create at start-up. Explicit bounds win over a linked spot's
/// region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub id: ViewportId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

fn default_viewports() -> Vec<ViewportConfig> {
    DEFAULT_SPOT_LABELS
        .iter()
        .map(|&label| ViewportConfig {
            id: label.into(),
            spot: Some(label.to_owned()),
            bounds: None,
        })
        .collect()
}

impl InspectorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BeamspotError::Config(e.to_string()))
    }

    /// Resolve each configured viewport to its starting bounds.
    pub fn build_viewports(&self) -> Result<Vec<Viewport>> {
        self.viewports
            .iter()
            .map(|vc| {
                let bounds = match (&vc.bounds, &vc.spot) {
                    (Some(b), _) => *b,
                    (None, Some(label)) => {
                        let center = self
                            .spots
                            .position(label)
                            .ok_or_else(|| BeamspotError::UnknownSpot(label.clone()))?;
                        Bounds::around(center, self.spots.viewing_range)?
                    }
                    (None, None) => {
                        return Err(BeamspotError::Config(format!(
                            "viewport '{}' needs bounds or a spot",
                            vc.id
                        )))
                    }
                };
                let mut viewport = Viewport::new(vc.id.clone(), bounds);
                viewport.spot = vc.spot.clone();
                Ok(viewport)
            })
            .collect()
    }
}
