use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::consts::{PARALLEL_SAMPLE_THRESHOLD, PROFILE_FULL_SCALE, PROFILE_STEP};
use crate::error::{BeamspotError, Result};
use crate::geometry::Point;
use crate::raster::Raster;

/// One normalised intensity sample along a profile line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProfileSample {
    pub index: usize,
    /// Intensity scaled so the profile maximum is 100.
    pub value: f64,
}

/// A sampled profile together with the endpoints it was sampled between.
///
/// The two are produced by the same call, so `handles` always matches the
/// line the samples came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    pub samples: Vec<ProfileSample>,
    pub handles: [Point; 2],
}

impl Profile {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// Distance in raster units between consecutive samples.
    pub fn spacing(&self) -> f64 {
        match self.samples.len() {
            0 | 1 => 0.0,
            n => self.handles[0].distance(&self.handles[1]) / (n - 1) as f64,
        }
    }
}

/// Number of samples taken along `p1 -> p2`: one per [`PROFILE_STEP`], rounded down.
///
/// Fails with [`BeamspotError::LineTooLong`] when the count does not fit a `usize`.
pub fn sample_count(p1: Point, p2: Point) -> Result<usize> {
    let length = p1.distance(&p2);
    let steps = (length / PROFILE_STEP).floor();
    if steps.is_infinite() || steps >= usize::MAX as f64 {
        return Err(BeamspotError::LineTooLong { length });
    }
    // NaN casts to 0 and is reported as degenerate by the caller
    Ok(steps as usize)
}

/// Sample `raster` along the segment `p1 -> p2`.
///
/// Points are evenly spaced with both endpoints included and evaluated by
/// bilinear interpolation, clamping to the grid edge. Values are scaled so
/// the largest is [`PROFILE_FULL_SCALE`].
pub fn sample(raster: &Raster, p1: Point, p2: Point) -> Result<Profile> {
    let count = sample_count(p1, p2)?;
    if count == 0 {
        return Err(BeamspotError::DegenerateLine { x: p1.x, y: p1.y });
    }

    let mut samples = evaluate_along(raster, p1, p2, count)?;
    let max = samples.iter().map(|s| s.value).fold(f64::NEG_INFINITY, f64::max);
    if max == 0.0 {
        return Err(BeamspotError::ZeroAmplitude);
    }

    let scale = PROFILE_FULL_SCALE / max;
    for s in &mut samples {
        s.value *= scale;
    }

    debug!(count, max, "Profile sampled");
    Ok(Profile {
        samples,
        handles: [p1, p2],
    })
}

/// Raw (unscaled) samples. The buffer is reserved up front so an
/// unallocatable count is an error rather than an abort.
fn evaluate_along(raster: &Raster, p1: Point, p2: Point, count: usize) -> Result<Vec<ProfileSample>> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(count)
        .map_err(|_| BeamspotError::LineTooLong {
            length: p1.distance(&p2),
        })?;

    let denom = count.saturating_sub(1).max(1) as f64;
    let at = |index: usize| {
        let p = p1.lerp(&p2, index as f64 / denom);
        ProfileSample {
            index,
            value: bilinear_clamped(raster, p.y, p.x),
        }
    };

    if count >= PARALLEL_SAMPLE_THRESHOLD {
        samples.par_extend((0..count).into_par_iter().map(at));
    } else {
        samples.extend((0..count).map(at));
    }
    Ok(samples)
}

/// Bilinear interpolation at `(y, x)` = `(row, col)`, with coordinates outside
/// the grid clamped onto its edge.
pub fn bilinear_clamped(raster: &Raster, y: f64, x: f64) -> f64 {
    let y = y.clamp(0.0, (raster.height() - 1) as f64);
    let x = x.clamp(0.0, (raster.width() - 1) as f64);

    let y0 = y.floor() as i64;
    let x0 = x.floor() as i64;
    let fy = y - y0 as f64;
    let fx = x - x0 as f64;

    let v00 = raster.at_clamped(y0, x0) as f64;
    let v01 = raster.at_clamped(y0, x0 + 1) as f64;
    let v10 = raster.at_clamped(y0 + 1, x0) as f64;
    let v11 = raster.at_clamped(y0 + 1, x0 + 1) as f64;

    v00 * (1.0 - fx) * (1.0 - fy) + v01 * fx * (1.0 - fy) + v10 * (1.0 - fx) * fy + v11 * fx * fy
}
