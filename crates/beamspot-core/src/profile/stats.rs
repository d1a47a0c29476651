use std::fmt::Write;

use serde::Serialize;

use crate::profile::sampler::Profile;

/// Summary of a normalised profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Full width at half maximum, in samples.
    pub fwhm: Option<f64>,
    /// Full width at half maximum, in raster units.
    pub fwhm_length: Option<f64>,
}

impl ProfileStats {
    pub fn compute(profile: &Profile) -> Self {
        if profile.is_empty() {
            return Self::default();
        }

        let (min, max, sum) = profile.values().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), v| (lo.min(v), hi.max(v), sum + v),
        );
        let mean = sum / profile.len() as f64;
        let fwhm = fwhm(profile, min, max);

        Self {
            min,
            max,
            mean,
            fwhm,
            fwhm_length: fwhm.map(|w| w * profile.spacing()),
        }
    }
}

/// Distance between the outermost samples at or above half maximum.
fn fwhm(profile: &Profile, min: f64, max: f64) -> Option<f64> {
    if max <= min {
        return None;
    }
    let half = min + (max - min) / 2.0;
    let first = profile.samples.iter().position(|s| s.value >= half)?;
    let last = profile.samples.iter().rposition(|s| s.value >= half)?;
    (last > first).then(|| (last - first) as f64)
}

/// `index,value` CSV of a profile.
pub fn to_csv(profile: &Profile) -> String {
    let mut csv = String::from("index,value\n");
    for s in &profile.samples {
        let _ = writeln!(csv, "{},{:.6}", s.index, s.value);
    }
    csv
}
