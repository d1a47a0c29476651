use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{BeamspotError, Result};
use crate::geometry::{Bounds, OverlayRectangle};
use crate::viewport::{Viewport, ViewportId};

/// Overlay rectangle tagged with the viewport it outlines.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewportOverlay {
    pub id: ViewportId,
    pub rectangle: OverlayRectangle,
}

/// Keeps one overlay rectangle per registered viewport in step with that
/// viewport's bounds.
///
/// A bounds change touches only the changed viewport's slot: the id lookup
/// is a hash map hit and the overlay is rebuilt from its own bounds. Slots
/// keep registration order, which is also the order overlays are emitted in.
#[derive(Debug, Default)]
pub struct ViewportSyncController {
    index: HashMap<ViewportId, usize>,
    viewports: Vec<Viewport>,
    overlays: Vec<ViewportOverlay>,
}

impl ViewportSyncController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a viewport, or replace the one already registered under its id.
    pub fn register(&mut self, viewport: Viewport) {
        let overlay = ViewportOverlay {
            id: viewport.id.clone(),
            rectangle: OverlayRectangle::from(&viewport.bounds()),
        };
        match self.index.get(&viewport.id) {
            Some(&slot) => {
                self.viewports[slot] = viewport;
                self.overlays[slot] = overlay;
            }
            None => {
                self.index.insert(viewport.id.clone(), self.viewports.len());
                self.viewports.push(viewport);
                self.overlays.push(overlay);
            }
        }
    }

    /// Apply new bounds to one viewport and return the full overlay set.
    ///
    /// Last write wins per id; updates for different ids are independent.
    pub fn on_bounds_changed(&mut self, id: &ViewportId, bounds: Bounds) -> Result<&[ViewportOverlay]> {
        let slot = self.slot(id)?;
        self.viewports[slot].set_bounds(bounds);
        self.overlays[slot].rectangle = OverlayRectangle::from(&bounds);
        debug!(viewport = %id, bounds = ?bounds.as_tuple(), "Overlay updated");
        Ok(self.overlays.as_slice())
    }

    /// Return a viewport to its home bounds through the same update path.
    pub fn reset(&mut self, id: &ViewportId) -> Result<&[ViewportOverlay]> {
        let home = self.viewports[self.slot(id)?].home();
        self.on_bounds_changed(id, home)
    }

    pub fn overlays(&self) -> &[ViewportOverlay] {
        &self.overlays
    }

    pub fn overlay(&self, id: &ViewportId) -> Option<&OverlayRectangle> {
        self.index.get(id).map(|&slot| &self.overlays[slot].rectangle)
    }

    pub fn viewport(&self, id: &ViewportId) -> Option<&Viewport> {
        self.index.get(id).map(|&slot| &self.viewports[slot])
    }

    pub fn bounds(&self, id: &ViewportId) -> Option<Bounds> {
        self.viewport(id).map(Viewport::bounds)
    }

    pub fn viewports(&self) -> impl Iterator<Item = &Viewport> {
        self.viewports.iter()
    }

    pub fn len(&self) -> usize {
        self.viewports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewports.is_empty()
    }

    fn slot(&self, id: &ViewportId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| BeamspotError::UnknownViewport(id.to_string()))
    }
}
