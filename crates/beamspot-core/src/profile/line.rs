use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BeamspotError, Result};
use crate::geometry::Point;
use crate::profile::sampler::{sample, Profile};
use crate::raster::Raster;

/// Which end of the profile line an edit applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    P1,
    P2,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::P1 => write!(f, "p1"),
            Endpoint::P2 => write!(f, "p2"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Endpoint),
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragState::Idle => write!(f, "idle"),
            DragState::Dragging(which) => write!(f, "dragging {which}"),
        }
    }
}

/// The shared profile line and the last profile sampled along it.
///
/// Every endpoint mutation runs exactly one resample against the raster
/// passed in. A failed resample keeps the previous profile; the endpoints
/// still take the new position.
#[derive(Debug)]
pub struct ProfileLine {
    p1: Point,
    p2: Point,
    state: DragState,
    profile: Option<Profile>,
    recomputations: u64,
}

impl ProfileLine {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            state: DragState::Idle,
            profile: None,
            recomputations: 0,
        }
    }

    pub fn endpoints(&self) -> (Point, Point) {
        (self.p1, self.p2)
    }

    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::P1 => self.p1,
            Endpoint::P2 => self.p2,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Last successfully sampled profile.
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Number of resamples attempted since construction, failed ones included.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn drag_start(&mut self, which: Endpoint) -> Result<()> {
        match self.state {
            DragState::Idle => {
                self.state = DragState::Dragging(which);
                Ok(())
            }
            state => Err(BeamspotError::InvalidDragTransition {
                action: "start a drag",
                state,
            }),
        }
    }

    /// Move the endpoint being dragged and resample.
    pub fn drag_move(&mut self, pos: Point, raster: &Raster) -> Result<&Profile> {
        let DragState::Dragging(which) = self.state else {
            return Err(BeamspotError::InvalidDragTransition {
                action: "move an endpoint",
                state: self.state,
            });
        };
        self.place(which, pos);
        self.resample(raster)
    }

    /// Ends a drag. Already idle is fine.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Programmatic edit of one endpoint, e.g. from the coordinate table.
    pub fn set_endpoint(&mut self, which: Endpoint, pos: Point, raster: &Raster) -> Result<&Profile> {
        self.place(which, pos);
        self.resample(raster)
    }

    /// Programmatic edit of both endpoints as one mutation.
    pub fn set_endpoints(&mut self, p1: Point, p2: Point, raster: &Raster) -> Result<&Profile> {
        self.p1 = p1;
        self.p2 = p2;
        self.resample(raster)
    }

    /// Rebuild the profile from the current endpoints, e.g. after a raster swap.
    pub fn resample(&mut self, raster: &Raster) -> Result<&Profile> {
        self.recomputations += 1;
        match sample(raster, self.p1, self.p2) {
            Ok(profile) => {
                debug!(samples = profile.len(), "Profile line resampled");
                Ok(&*self.profile.insert(profile))
            }
            Err(e) => {
                warn!("Keeping previous profile: {e}");
                Err(e)
            }
        }
    }

    fn place(&mut self, which: Endpoint, pos: Point) {
        match which {
            Endpoint::P1 => self.p1 = pos,
            Endpoint::P2 => self.p2 = pos,
        }
    }
}
