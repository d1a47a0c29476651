mod common;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use beamspot_core::consts::PARALLEL_SAMPLE_THRESHOLD;
use beamspot_core::error::BeamspotError;
use beamspot_core::geometry::Point;
use beamspot_core::profile::stats::to_csv;
use beamspot_core::profile::{sample, sample_count, ProfileStats};

use common::{gaussian_grid, index_grid, oriented};

#[test]
fn test_sample_count_for_default_diagonal() {
    let raster = oriented(gaussian_grid(1000, 800, 600.0, 800.0, 8.0, 1000.0));
    let p1 = Point::new(570.0, 770.0);
    let p2 = Point::new(630.0, 830.0);

    assert_eq!(sample_count(p1, p2).unwrap(), 848);
    let profile = sample(&raster, p1, p2).unwrap();
    assert_eq!(profile.len(), 848);
    assert_eq!(profile.samples[0].index, 0);
    assert_eq!(profile.samples[847].index, 847);
}

#[test]
fn test_profile_peaks_at_full_scale() {
    let raster = oriented(gaussian_grid(64, 64, 30.3, 20.7, 3.0, 200.0));
    let profile = sample(&raster, Point::new(5.0, 5.0), Point::new(60.0, 40.0)).unwrap();
    let max = profile.values().fold(f64::NEG_INFINITY, f64::max);
    assert_abs_diff_eq!(max, 100.0, epsilon = 1e-6);
    assert!(profile.values().all(|v| (0.0..=100.0 + 1e-9).contains(&v)));
}

#[test]
fn test_sample_count_matches_floor_of_length() {
    let raster = oriented(index_grid(50, 50));
    for (p1, p2) in [
        (Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
        (Point::new(10.5, 2.25), Point::new(11.0, 40.0)),
        (Point::new(49.0, 0.0), Point::new(0.0, 49.0)),
    ] {
        let expected = (p1.distance(&p2) / 0.1).floor() as usize;
        assert_eq!(sample(&raster, p1, p2).unwrap().len(), expected);
    }
}

#[test]
fn test_handles_match_sampled_endpoints() {
    let raster = oriented(index_grid(20, 20));
    let p1 = Point::new(1.0, 2.0);
    let p2 = Point::new(15.0, 9.5);
    let profile = sample(&raster, p1, p2).unwrap();
    assert_eq!(profile.handles, [p1, p2]);
}

#[test]
fn test_endpoints_are_sampled_exactly() {
    // Value grows along columns only, so the first and last samples are known.
    let grid = Array2::from_shape_fn((10, 30), |(_, col)| (col + 1) as f32);
    let raster = oriented(grid);
    let profile = sample(&raster, Point::new(4.0, 5.0), Point::new(19.0, 5.0)).unwrap();
    // raw endpoints are 5 and 20, max is 20
    assert_abs_diff_eq!(profile.samples[0].value, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(profile.samples.last().unwrap().value, 100.0, epsilon = 1e-9);
}

#[test]
fn test_sampling_is_pure() {
    let raster = oriented(gaussian_grid(40, 40, 20.0, 20.0, 4.0, 90.0));
    let p1 = Point::new(2.0, 3.0);
    let p2 = Point::new(37.0, 31.0);
    assert_eq!(sample(&raster, p1, p2).unwrap(), sample(&raster, p1, p2).unwrap());
}

#[test]
fn test_coincident_endpoints_are_degenerate() {
    let raster = oriented(index_grid(5, 5));
    let p = Point::new(2.0, 2.0);
    assert!(matches!(
        sample(&raster, p, p),
        Err(BeamspotError::DegenerateLine { .. })
    ));
}

#[test]
fn test_line_shorter_than_one_step_is_degenerate() {
    let raster = oriented(index_grid(5, 5));
    let err = sample(&raster, Point::new(1.0, 1.0), Point::new(1.05, 1.0)).unwrap_err();
    assert!(matches!(err, BeamspotError::DegenerateLine { .. }));
}

#[test]
fn test_huge_line_is_rejected_not_allocated() {
    let raster = oriented(index_grid(5, 5));
    let origin = Point::new(0.0, 0.0);

    // Count overflows usize
    let err = sample(&raster, origin, Point::new(1e300, 0.0)).unwrap_err();
    assert!(matches!(err, BeamspotError::LineTooLong { .. }));
    assert!(matches!(
        sample_count(origin, Point::new(1e300, 0.0)),
        Err(BeamspotError::LineTooLong { .. })
    ));

    // Count fits usize but the buffer would not fit in memory
    let err = sample(&raster, origin, Point::new(1e17, 0.0)).unwrap_err();
    assert!(matches!(err, BeamspotError::LineTooLong { .. }));

    // Infinite length
    let err = sample(&raster, Point::new(-f64::MAX, 0.0), Point::new(f64::MAX, 0.0)).unwrap_err();
    assert!(matches!(err, BeamspotError::LineTooLong { .. }));
}

#[test]
fn test_all_zero_segment_is_zero_amplitude() {
    let mut grid = Array2::<f32>::zeros((20, 20));
    grid[[18, 18]] = 50.0;
    let raster = oriented(grid);
    let err = sample(&raster, Point::new(1.0, 1.0), Point::new(10.0, 1.0)).unwrap_err();
    assert!(matches!(err, BeamspotError::ZeroAmplitude));
}

#[test]
fn test_line_outside_raster_is_clamped_to_edge() {
    let grid = Array2::from_shape_fn((10, 10), |(row, _)| (row + 1) as f32);
    let raster = oriented(grid);
    // Runs along y = 25, far above the top row
    let profile = sample(&raster, Point::new(-5.0, 25.0), Point::new(15.0, 25.0)).unwrap();
    assert_eq!(profile.len(), 200);
    assert!(profile.values().all(|v| (v - 100.0).abs() < 1e-9));
}

#[test]
fn test_long_line_uses_same_values_as_short_path() {
    // Long enough to cross the parallel threshold
    let raster = oriented(gaussian_grid(1200, 1200, 599.5, 599.5, 150.0, 500.0));
    let p1 = Point::new(0.0, 0.0);
    let p2 = Point::new(1199.0, 1199.0);
    let profile = sample(&raster, p1, p2).unwrap();
    assert!(profile.len() >= PARALLEL_SAMPLE_THRESHOLD);

    // Samples are symmetric about the centre of the spot
    let n = profile.len();
    for i in [0, n / 4, n / 3] {
        assert_abs_diff_eq!(
            profile.samples[i].value,
            profile.samples[n - 1 - i].value,
            epsilon = 1e-3
        );
    }
}

#[test]
fn test_stats_of_gaussian_profile() {
    let raster = oriented(gaussian_grid(41, 41, 20.0, 20.0, 3.0, 250.0));
    let profile = sample(&raster, Point::new(0.0, 20.0), Point::new(40.0, 20.0)).unwrap();
    let stats = ProfileStats::compute(&profile);

    assert_abs_diff_eq!(stats.max, 100.0, epsilon = 1e-6);
    assert!(stats.min < 1.0);
    // FWHM of a Gaussian is 2.3548 sigma
    let fwhm = stats.fwhm_length.unwrap();
    assert!((fwhm - 2.3548 * 3.0).abs() < 0.3, "fwhm = {fwhm}");
}

#[test]
fn test_csv_export_has_one_row_per_sample() {
    let raster = oriented(index_grid(10, 10));
    let profile = sample(&raster, Point::new(0.0, 0.0), Point::new(0.0, 1.0)).unwrap();
    let csv = to_csv(&profile);
    assert!(csv.starts_with("index,value\n"));
    assert_eq!(csv.lines().count(), profile.len() + 1);
}
