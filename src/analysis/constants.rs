//! Fixed parameters of the response time analysis
//!
//! The threshold and bucket names are illustrative: samples below the threshold
//! are assumed to have been served from cache.

/// Response time (ms) separating the "cached" and "uncached" buckets.
pub const CACHE_THRESHOLD_MS: i64 = 50;

/// Number of histogram bins per bucket.
pub const HISTOGRAM_BINS: usize = 20;

/// Opacity of the overlapping histogram bars.
pub const HISTOGRAM_OPACITY: f64 = 0.5;

/// Smoothing window used when none is given on the command line.
pub const DEFAULT_WINDOW: usize = 100;

/// Opacity of the raw sample line under the smoothed curve.
pub const RAW_LINE_OPACITY: f64 = 0.3;
