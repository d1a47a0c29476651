use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{InspectorConfig, SpotLayoutConfig};
use crate::error::Result;
use crate::events::{EventBus, HostEvent, Notification, NotificationKind, Subscriber};
use crate::geometry::{OverlayRectangle, Point};
use crate::profile::{Profile, ProfileLine};
use crate::raster::{ImageBuffer, Raster};
use crate::spots::SpotRegistry;
use crate::viewport::{ViewportOverlay, ViewportSyncController};

/// One inspection session: the shared raster, the profile line, the linked
/// viewports and the spot registry, driven by [`HostEvent`]s.
///
/// The spot registry is built from the configured layout once measured
/// positions are supplied, either up front with [`Inspector::with_measurements`]
/// or later through [`HostEvent::MeasurementsSupplied`].
///
/// Events are applied one at a time to completion. A rejected event is
/// published as [`Notification::Failed`] and returned as the error; the state
/// object that rejected it keeps its last good value. An uploaded raster that
/// decodes is swapped in even if the profile along the current line then
/// fails to normalise.
#[derive(Debug)]
pub struct Inspector {
    image: ImageBuffer,
    line: ProfileLine,
    viewports: ViewportSyncController,
    spots: SpotRegistry,
    layout: SpotLayoutConfig,
    reference_image: Option<PathBuf>,
    bus: EventBus,
}

impl Inspector {
    pub fn new(config: &InspectorConfig, raster: Raster) -> Result<Self> {
        let mut viewports = ViewportSyncController::new();
        for viewport in config.build_viewports()? {
            viewports.register(viewport);
        }

        let mut line = ProfileLine::new(config.profile.start, config.profile.end);
        if line.resample(&raster).is_err() {
            warn!("Initial profile unavailable");
        }

        debug!(viewports = viewports.len(), "Inspector created");
        Ok(Self {
            image: ImageBuffer::new(raster),
            line,
            viewports,
            spots: SpotRegistry::new(),
            layout: config.spots.clone(),
            reference_image: config.reference_image.clone(),
            bus: EventBus::new(),
        })
    }

    pub fn with_spots(mut self, spots: SpotRegistry) -> Self {
        self.spots = spots;
        self
    }

    /// Build the spot registry from the configured layout and `measured`.
    pub fn with_measurements(mut self, measured: &HashMap<String, Point>) -> Result<Self> {
        self.spots = self.spots_from(measured)?;
        Ok(self)
    }

    pub fn subscribe(&mut self, kind: NotificationKind, subscriber: impl Subscriber + 'static) {
        self.bus.subscribe(kind, subscriber);
    }

    pub fn handle(&mut self, event: HostEvent) -> Result<()> {
        self.apply(event).inspect_err(|e| {
            warn!("Host event rejected: {e}");
            self.bus.publish(&Notification::Failed(e));
        })
    }

    fn apply(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::BoundsChanged { viewport, bounds } => {
                let overlays = self.viewports.on_bounds_changed(&viewport, bounds)?;
                self.bus.publish(&Notification::OverlaysChanged(overlays));
            }
            HostEvent::ResetViewport { viewport } => {
                let overlays = self.viewports.reset(&viewport)?;
                self.bus.publish(&Notification::OverlaysChanged(overlays));
            }
            HostEvent::DragStart { endpoint } => self.line.drag_start(endpoint)?,
            HostEvent::DragMove { position } => {
                let profile = self.line.drag_move(position, self.image.raster())?;
                self.bus.publish(&Notification::ProfileChanged(profile));
            }
            HostEvent::DragEnd => self.line.drag_end(),
            HostEvent::EndpointsEdited { p1, p2 } => {
                let profile = self.line.set_endpoints(p1, p2, self.image.raster())?;
                self.bus.publish(&Notification::ProfileChanged(profile));
            }
            HostEvent::MeasurementsSupplied { measured } => {
                self.spots = self.spots_from(&measured)?;
                self.bus.publish(&Notification::SpotsChanged(&self.spots));
            }
            HostEvent::FileUploaded { bytes } => {
                let raster = ImageBuffer::load(&bytes)?;
                self.image.replace(raster);
                self.bus
                    .publish(&Notification::ImageReplaced(self.image.raster()));
                let profile = self.line.resample(self.image.raster())?;
                self.bus.publish(&Notification::ProfileChanged(profile));
            }
        }
        Ok(())
    }

    fn spots_from(&self, measured: &HashMap<String, Point>) -> Result<SpotRegistry> {
        SpotRegistry::from_layout(self.layout.iter(), self.layout.viewing_range, measured)
    }

    pub fn image(&self) -> &ImageBuffer {
        &self.image
    }

    pub fn line(&self) -> &ProfileLine {
        &self.line
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.line.profile()
    }

    pub fn viewports(&self) -> &ViewportSyncController {
        &self.viewports
    }

    pub fn overlays(&self) -> &[ViewportOverlay] {
        self.viewports.overlays()
    }

    pub fn spots(&self) -> &SpotRegistry {
        &self.spots
    }

    pub fn spot_regions(&self) -> Vec<(&str, OverlayRectangle)> {
        self.spots.region_overlays()
    }

    /// Decorative image the host shows beside the profile. Passed through
    /// from the config untouched.
    pub fn reference_image(&self) -> Option<&Path> {
        self.reference_image.as_deref()
    }
}
