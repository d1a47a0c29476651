use serde::{Deserialize, Serialize};

use crate::consts::OVERLAY_POINT_COUNT;
use crate::error::{BeamspotError, Result};

/// A position in raster coordinates: `x` along columns, `y` along rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at parameter `t` on the segment `self -> other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in raster coordinates.
///
/// Constructed through [`Bounds::new`], which enforces `x_start < x_end` and
/// `y_start < y_end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct Bounds {
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
}

impl Bounds {
    pub fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Result<Self> {
        let finite = [x_start, x_end, y_start, y_end].iter().all(|v| v.is_finite());
        if !finite || x_start >= x_end || y_start >= y_end {
            return Err(BeamspotError::InvalidBounds {
                x_start,
                x_end,
                y_start,
                y_end,
            });
        }
        Ok(Self {
            x_start,
            x_end,
            y_start,
            y_end,
        })
    }

    /// Square of half-width `half_range` centred on `center`.
    pub fn around(center: Point, half_range: f64) -> Result<Self> {
        Self::new(
            center.x - half_range,
            center.x + half_range,
            center.y - half_range,
            center.y + half_range,
        )
    }

    pub fn x_start(&self) -> f64 {
        self.x_start
    }

    pub fn x_end(&self) -> f64 {
        self.x_end
    }

    pub fn y_start(&self) -> f64 {
        self.y_start
    }

    pub fn y_end(&self) -> f64 {
        self.y_end
    }

    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// `(x_start, x_end, y_start, y_end)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_start, self.x_end, self.y_start, self.y_end)
    }
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = BeamspotError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.x_start, raw.x_end, raw.y_start, raw.y_end)
    }
}

impl From<Bounds> for RawBounds {
    fn from(b: Bounds) -> Self {
        RawBounds {
            x_start: b.x_start,
            x_end: b.x_end,
            y_start: b.y_start,
            y_end: b.y_end,
        }
    }
}

/// Closed 5-point polygon tracing a [`Bounds`] counter-clockwise from
/// `(x_start, y_start)`. The first and last points are always equal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayRectangle {
    pub points: [Point; OVERLAY_POINT_COUNT],
}

impl From<&Bounds> for OverlayRectangle {
    fn from(b: &Bounds) -> Self {
        let origin = Point::new(b.x_start, b.y_start);
        Self {
            points: [
                origin,
                Point::new(b.x_end, b.y_start),
                Point::new(b.x_end, b.y_end),
                Point::new(b.x_start, b.y_end),
                origin,
            ],
        }
    }
}

impl OverlayRectangle {
    /// Polygon x coordinates, as a line renderer consumes them.
    pub fn xs(&self) -> [f64; OVERLAY_POINT_COUNT] {
        self.points.map(|p| p.x)
    }

    pub fn ys(&self) -> [f64; OVERLAY_POINT_COUNT] {
        self.points.map(|p| p.y)
    }
}
