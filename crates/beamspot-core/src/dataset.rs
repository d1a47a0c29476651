//! Selection of the image and measured spot positions for one
//! (date, energy) key out of an inspection table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::{BeamspotError, Result};
use crate::geometry::Point;

/// Date formats accepted in tables: ISO first, then day-first.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// One complete row of the inspection table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetRow {
    pub date: NaiveDate,
    pub energy: f64,
    pub image_file_location: PathBuf,
    /// Label of the spot this row measures.
    pub spot: Option<String>,
    pub x_position: f64,
    pub y_position: f64,
}

/// Row as stored; date and energy may be missing.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRow {
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub energy: Option<f64>,
    pub image_file_location: PathBuf,
    #[serde(default)]
    pub spot: Option<String>,
    pub x_position: f64,
    pub y_position: f64,
}

#[derive(Deserialize)]
struct TableFile {
    #[serde(default)]
    rows: Vec<RawRow>,
}

/// Parse `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{s}'"))),
    }
}

/// Rows for a single (date, energy) key, all pointing at one image file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub date: NaiveDate,
    pub energy: f64,
    pub image_file_location: PathBuf,
    pub rows: Vec<DatasetRow>,
}

impl Selection {
    /// Measured position per spot label. Rows without a label are ignored;
    /// a label given twice keeps its last row.
    pub fn measured_positions(&self) -> HashMap<String, Point> {
        self.rows
            .iter()
            .filter_map(|r| {
                let label = r.spot.clone()?;
                Some((label, Point::new(r.x_position, r.y_position)))
            })
            .collect()
    }
}

/// Source of inspection rows filtered by optional date and energy.
pub trait DatasetQuery {
    /// Select the rows for one key. A missing date picks the newest date; a
    /// missing energy picks the highest energy recorded on the chosen date.
    fn select(&self, date: Option<NaiveDate>, energy: Option<f64>) -> Result<Selection>;
}

/// In-memory table of complete rows.
#[derive(Clone, Debug, Default)]
pub struct DatasetTable {
    rows: Vec<DatasetRow>,
}

impl DatasetTable {
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    /// Keep only rows that carry both a date and an energy.
    pub fn from_raw_rows(raw: Vec<RawRow>) -> Self {
        let total = raw.len();
        let rows: Vec<DatasetRow> = raw
            .into_iter()
            .filter_map(|r| {
                Some(DatasetRow {
                    date: r.date?,
                    energy: r.energy?,
                    image_file_location: r.image_file_location,
                    spot: r.spot,
                    x_position: r.x_position,
                    y_position: r.y_position,
                })
            })
            .collect();
        if rows.len() < total {
            debug!(dropped = total - rows.len(), "Dropped rows without date or energy");
        }
        Self { rows }
    }

    /// Parse a TOML document holding a `[[rows]]` array.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: TableFile = toml::from_str(s)?;
        Ok(Self::from_raw_rows(file.rows))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DatasetQuery for DatasetTable {
    fn select(&self, date: Option<NaiveDate>, energy: Option<f64>) -> Result<Selection> {
        let empty = || BeamspotError::EmptyDataset { date, energy };

        let chosen_date = match date {
            Some(d) => d,
            None => self.rows.iter().map(|r| r.date).max().ok_or_else(empty)?,
        };
        let on_date: Vec<&DatasetRow> = self.rows.iter().filter(|r| r.date == chosen_date).collect();

        let chosen_energy = match energy {
            Some(e) => e,
            None => on_date
                .iter()
                .map(|r| r.energy)
                .max_by(f64::total_cmp)
                .ok_or_else(empty)?,
        };
        let rows: Vec<DatasetRow> = on_date
            .into_iter()
            .filter(|r| r.energy == chosen_energy)
            .cloned()
            .collect();

        let Some(first) = rows.first() else {
            return Err(empty());
        };
        let image_file_location = first.image_file_location.clone();

        let mut locations: Vec<PathBuf> = Vec::new();
        for r in &rows {
            if !locations.contains(&r.image_file_location) {
                locations.push(r.image_file_location.clone());
            }
        }
        if locations.len() > 1 {
            return Err(BeamspotError::InconsistentSource {
                date: chosen_date,
                energy: chosen_energy,
                locations,
            });
        }

        info!(
            date = %chosen_date,
            energy = chosen_energy,
            rows = rows.len(),
            "Dataset key selected"
        );
        Ok(Selection {
            date: chosen_date,
            energy: chosen_energy,
            image_file_location,
            rows,
        })
    }
}
