//! Domain-specific analysis modules
//!
//! This module contains the analysis logic for:
//! - Cached vs. uncached histogram
//! - Sliding-window smoothing and its plot

pub mod constants;
pub mod histogram;
pub mod smoothing;
pub mod smoothing_plot;

// Re-export analysis functions for convenience
pub use histogram::{run_histogram, HistogramError};
pub use smoothing::{SmoothingConfig, SmoothingMethod};
pub use smoothing_plot::{run_smoothing, SmoothingOutcome, SmoothingToolError};
