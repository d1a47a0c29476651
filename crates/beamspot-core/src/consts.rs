/// Distance between consecutive profile samples, in raster units.
pub const PROFILE_STEP: f64 = 0.1;

/// Value the largest profile sample is scaled to.
pub const PROFILE_FULL_SCALE: f64 = 100.0;

/// Minimum sample count to evaluate a profile with Rayon.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 16_384;

/// Default profile start point, a diagonal across the top-left spot.
pub const DEFAULT_PROFILE_START: (f64, f64) = (570.0, 770.0);

/// Default profile end point.
pub const DEFAULT_PROFILE_END: (f64, f64) = (630.0, 830.0);

/// Half-width of the region drawn around each expected spot position.
pub const DEFAULT_VIEWING_RANGE: f64 = 40.0;

/// Column positions of the default 3x3 spot grid.
pub const DEFAULT_SPOT_COLUMNS: [f64; 3] = [600.0, 800.0, 1000.0];

/// Row positions of the default 3x3 spot grid, top to bottom.
pub const DEFAULT_SPOT_ROWS: [f64; 3] = [800.0, 600.0, 400.0];

/// Labels of the default spot grid, row-major from the top-left.
pub const DEFAULT_SPOT_LABELS: [&str; 9] = ["tl", "tc", "tr", "ml", "mc", "mr", "bl", "bc", "br"];

/// Number of points in a closed overlay polygon.
pub const OVERLAY_POINT_COUNT: usize = 5;
