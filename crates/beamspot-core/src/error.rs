use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::profile::line::DragState;

#[derive(Error, Debug)]
pub enum BeamspotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot load raster: {0}")]
    Load(String),

    #[error("Grid index ({row}, {col}) out of bounds for {height}x{width} raster")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Profile endpoints ({x}, {y}) coincide or are closer than one sampling step")]
    DegenerateLine { x: f64, y: f64 },

    #[error("Profile line of length {length} is too long to sample")]
    LineTooLong { length: f64 },

    #[error("Profile samples are all zero, cannot normalise")]
    ZeroAmplitude,

    #[error("Rows for date {date}, energy {energy} reference different files: {locations:?}")]
    InconsistentSource {
        date: NaiveDate,
        energy: f64,
        locations: Vec<PathBuf>,
    },

    #[error("No dataset rows match date {date:?}, energy {energy:?}")]
    EmptyDataset {
        date: Option<NaiveDate>,
        energy: Option<f64>,
    },

    #[error("Invalid viewport bounds: x {x_start}..{x_end}, y {y_start}..{y_end}")]
    InvalidBounds {
        x_start: f64,
        x_end: f64,
        y_start: f64,
        y_end: f64,
    },

    #[error("Unknown viewport: {0}")]
    UnknownViewport(String),

    #[error("Unknown spot: {0}")]
    UnknownSpot(String),

    #[error("Cannot {action} while {state}")]
    InvalidDragTransition {
        action: &'static str,
        state: DragState,
    },

    #[error("Invalid config: {0}")]
    Config(String),
}

impl From<toml::de::Error> for BeamspotError {
    fn from(e: toml::de::Error) -> Self {
        BeamspotError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BeamspotError>;
