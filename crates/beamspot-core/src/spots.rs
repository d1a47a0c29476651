use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::error::{BeamspotError, Result};
use crate::geometry::{Bounds, OverlayRectangle, Point};

/// Expected and measured position of one labelled spot.
///
/// The measured position always comes from outside; nothing here detects spots.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpotRecord {
    pub label: String,
    pub expected: Point,
    pub measured: Point,
    pub half_range: f64,
}

impl SpotRecord {
    /// `measured - expected`.
    pub fn offset(&self) -> (f64, f64) {
        (
            self.measured.x - self.expected.x,
            self.measured.y - self.expected.y,
        )
    }

    /// `expected ± half_range` on both axes.
    pub fn region_bounds(&self) -> Result<Bounds> {
        Bounds::around(self.expected, self.half_range)
    }
}

/// Labelled spots in registration order.
#[derive(Debug, Default)]
pub struct SpotRegistry {
    index: HashMap<String, usize>,
    records: Vec<SpotRecord>,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an expected layout and externally measured positions.
    /// Spots without a measurement are left out.
    pub fn from_layout<'a>(
        expected: impl IntoIterator<Item = (&'a str, Point)>,
        half_range: f64,
        measured: &HashMap<String, Point>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for (label, exp) in expected {
            match measured.get(label) {
                Some(&meas) => registry.register(label, exp, meas, half_range)?,
                None => warn!(spot = label, "No measured position, spot skipped"),
            }
        }
        Ok(registry)
    }

    /// Add a spot. A label registered twice keeps the latest record.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        expected: Point,
        measured: Point,
        half_range: f64,
    ) -> Result<()> {
        let record = SpotRecord {
            label: label.into(),
            expected,
            measured,
            half_range,
        };
        // Reject ranges that cannot form a region
        record.region_bounds()?;

        match self.index.get(&record.label) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(record.label.clone(), self.records.len());
                self.records.push(record);
            }
        }
        Ok(())
    }

    pub fn get(&self, label: &str) -> Result<&SpotRecord> {
        self.index
            .get(label)
            .map(|&slot| &self.records[slot])
            .ok_or_else(|| BeamspotError::UnknownSpot(label.to_owned()))
    }

    pub fn offset(&self, label: &str) -> Result<(f64, f64)> {
        Ok(self.get(label)?.offset())
    }

    pub fn region_bounds(&self, label: &str) -> Result<Bounds> {
        self.get(label)?.region_bounds()
    }

    /// Region polygon of every spot, for drawing on the overview.
    pub fn region_overlays(&self) -> Vec<(&str, OverlayRectangle)> {
        self.records
            .iter()
            .filter_map(|r| {
                let bounds = r.region_bounds().ok()?;
                Some((r.label.as_str(), OverlayRectangle::from(&bounds)))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpotRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
