//! # Response Time Plots
//! Visualizations of recorded endpoint response times.
//!
//! Two command line tools are built on this library:
//! - `response-histogram`: overlapping histograms of cached and uncached requests
//! - `response-smoothing`: raw samples with a moving average or median filter overlaid
//!
//! Both read `response_times.txt` (one measurement in milliseconds per line) from
//! the working directory.

/// Loading of the response time recording.
pub mod parsing;

/// Plotting, display and table infrastructure shared by both tools.
pub mod common;

/// Bucketing, binning and smoothing of the samples.
pub mod analysis;
