use beamspot_core::error::BeamspotError;
use beamspot_core::geometry::{Bounds, OverlayRectangle, Point};
use beamspot_core::viewport::{Viewport, ViewportId, ViewportSyncController};

fn bounds(x0: f64, x1: f64, y0: f64, y1: f64) -> Bounds {
    Bounds::new(x0, x1, y0, y1).unwrap()
}

fn controller() -> ViewportSyncController {
    let mut c = ViewportSyncController::new();
    c.register(Viewport::new("A", bounds(0.0, 100.0, 0.0, 100.0)));
    c.register(Viewport::new("B", bounds(560.0, 640.0, 760.0, 840.0)));
    c
}

#[test]
fn test_bounds_change_rebuilds_overlay() {
    let mut c = controller();
    let a = ViewportId::from("A");
    c.on_bounds_changed(&a, bounds(100.0, 500.0, 0.0, 100.0))
        .unwrap();

    let expected = [
        Point::new(100.0, 0.0),
        Point::new(500.0, 0.0),
        Point::new(500.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(100.0, 0.0),
    ];
    assert_eq!(c.overlay(&a).unwrap().points, expected);
}

#[test]
fn test_other_viewports_are_untouched() {
    let mut c = controller();
    let b = ViewportId::from("B");
    let b_bounds = c.bounds(&b).unwrap();
    let b_overlay = c.overlay(&b).unwrap().clone();

    c.on_bounds_changed(&"A".into(), bounds(100.0, 500.0, 0.0, 100.0))
        .unwrap();

    assert_eq!(c.bounds(&b).unwrap(), b_bounds);
    assert_eq!(c.overlay(&b).unwrap(), &b_overlay);
    assert_eq!(c.overlay(&b).unwrap().xs(), [560.0, 640.0, 640.0, 560.0, 560.0]);
}

#[test]
fn test_emits_one_closed_overlay_per_viewport() {
    let mut c = controller();
    let overlays = c
        .on_bounds_changed(&"B".into(), bounds(1.0, 2.0, 3.0, 4.0))
        .unwrap();
    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].id, ViewportId::from("A"));
    assert_eq!(overlays[1].id, ViewportId::from("B"));
    for o in overlays {
        assert_eq!(o.rectangle.points.len(), 5);
        assert_eq!(o.rectangle.points[0], o.rectangle.points[4]);
    }
}

#[test]
fn test_last_write_wins_per_viewport() {
    let mut c = controller();
    let a = ViewportId::from("A");
    c.on_bounds_changed(&a, bounds(0.0, 10.0, 0.0, 10.0)).unwrap();
    c.on_bounds_changed(&a, bounds(5.0, 15.0, 5.0, 15.0)).unwrap();
    assert_eq!(c.bounds(&a).unwrap().as_tuple(), (5.0, 15.0, 5.0, 15.0));
}

#[test]
fn test_reset_restores_home_bounds() {
    let mut c = controller();
    let a = ViewportId::from("A");
    c.on_bounds_changed(&a, bounds(300.0, 310.0, 300.0, 310.0))
        .unwrap();
    c.reset(&a).unwrap();
    assert_eq!(c.bounds(&a).unwrap().as_tuple(), (0.0, 100.0, 0.0, 100.0));
    assert_eq!(
        c.overlay(&a).unwrap(),
        &OverlayRectangle::from(&bounds(0.0, 100.0, 0.0, 100.0))
    );
}

#[test]
fn test_unknown_viewport_is_an_error() {
    let mut c = controller();
    let err = c
        .on_bounds_changed(&"Z".into(), bounds(0.0, 1.0, 0.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, BeamspotError::UnknownViewport(id) if id == "Z"));
    assert_eq!(c.len(), 2);
}

#[test]
fn test_reregistering_replaces_in_place() {
    let mut c = controller();
    c.register(Viewport::new("A", bounds(1.0, 2.0, 1.0, 2.0)));
    assert_eq!(c.len(), 2);
    assert_eq!(c.overlays()[0].id, ViewportId::from("A"));
    assert_eq!(c.bounds(&"A".into()).unwrap().as_tuple(), (1.0, 2.0, 1.0, 2.0));
}

#[test]
fn test_inverted_bounds_cannot_be_built() {
    assert!(matches!(
        Bounds::new(500.0, 100.0, 0.0, 100.0),
        Err(BeamspotError::InvalidBounds { .. })
    ));
}
