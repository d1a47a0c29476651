pub mod sync;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;

pub use sync::{ViewportOverlay, ViewportSyncController};

/// Stable name of a viewport, e.g. `"tl"` or `"zoom"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportId(String);

impl ViewportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewportId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One pan/zoom window over the shared raster.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub id: ViewportId,
    /// Spot this viewport inspects, if any.
    pub spot: Option<String>,
    bounds: Bounds,
    home: Bounds,
}

impl Viewport {
    pub fn new(id: impl Into<ViewportId>, bounds: Bounds) -> Self {
        Self {
            id: id.into(),
            spot: None,
            bounds,
            home: bounds,
        }
    }

    pub fn with_spot(mut self, label: impl Into<String>) -> Self {
        self.spot = Some(label.into());
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bounds the viewport was created with; `reset` returns here.
    pub fn home(&self) -> Bounds {
        self.home
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

impl From<String> for ViewportId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
