use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::BeamspotError;
use crate::geometry::{Bounds, Point};
use crate::profile::{Endpoint, Profile};
use crate::raster::Raster;
use crate::spots::SpotRegistry;
use crate::viewport::{ViewportId, ViewportOverlay};

/// Input pushed by the UI/render host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// A viewport was panned or zoomed.
    BoundsChanged { viewport: ViewportId, bounds: Bounds },
    /// Reset tool on a viewport.
    ResetViewport { viewport: ViewportId },
    DragStart { endpoint: Endpoint },
    DragMove { position: Point },
    DragEnd,
    /// Both endpoints typed into the coordinate table.
    EndpointsEdited { p1: Point, p2: Point },
    /// Measured spot positions by label, from a detector or a dataset selection.
    MeasurementsSupplied { measured: HashMap<String, Point> },
    /// Raw bytes of a raster file the operator uploaded.
    #[serde(skip)]
    FileUploaded { bytes: Vec<u8> },
}

/// Output published to subscribers after a host event is applied.
#[derive(Debug)]
pub enum Notification<'a> {
    /// Full overlay set, one rectangle per registered viewport.
    OverlaysChanged(&'a [ViewportOverlay]),
    ProfileChanged(&'a Profile),
    ImageReplaced(&'a Raster),
    /// Spot registry rebuilt; region rectangles come from
    /// [`SpotRegistry::region_overlays`].
    SpotsChanged(&'a SpotRegistry),
    /// The event was rejected; every state object kept its last good value.
    Failed(&'a BeamspotError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    OverlaysChanged,
    ProfileChanged,
    ImageReplaced,
    SpotsChanged,
    Failed,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 5] = [
        NotificationKind::OverlaysChanged,
        NotificationKind::ProfileChanged,
        NotificationKind::ImageReplaced,
        NotificationKind::SpotsChanged,
        NotificationKind::Failed,
    ];
}

impl Notification<'_> {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::OverlaysChanged(_) => NotificationKind::OverlaysChanged,
            Notification::ProfileChanged(_) => NotificationKind::ProfileChanged,
            Notification::ImageReplaced(_) => NotificationKind::ImageReplaced,
            Notification::SpotsChanged(_) => NotificationKind::SpotsChanged,
            Notification::Failed(_) => NotificationKind::Failed,
        }
    }
}

/// Receiver of notifications of the kinds it was registered for.
pub trait Subscriber {
    fn notify(&mut self, notification: &Notification<'_>);
}

impl<F> Subscriber for F
where
    F: FnMut(&Notification<'_>),
{
    fn notify(&mut self, notification: &Notification<'_>) {
        self(notification)
    }
}

/// Subscribers keyed by notification kind, called in registration order.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<NotificationKind, Vec<Box<dyn Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: NotificationKind, subscriber: impl Subscriber + 'static) {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(subscriber));
    }

    pub fn publish(&mut self, notification: &Notification<'_>) {
        if let Some(subs) = self.subscribers.get_mut(&notification.kind()) {
            for sub in subs.iter_mut() {
                sub.notify(notification);
            }
        }
    }

    pub fn subscriber_count(&self, kind: NotificationKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self
            .subscribers
            .iter()
            .map(|(kind, subs)| (*kind, subs.len()))
            .collect();
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}
