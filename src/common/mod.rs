//! Common infrastructure shared by both tools
//!
//! This module provides reusable infrastructure for:
//! - Bucket summary rows and ASCII table formatting
//! - Rendering figures to image files
//! - Showing figures in the platform image viewer

pub mod buckets;
pub mod display;
pub mod plots;

// Re-export commonly used items
pub use display::{show_figure, DisplayError, DisplayOutcome};
pub use plots::{save_figure, Figure, PlotError};
