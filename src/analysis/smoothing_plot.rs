//! Raw vs. smoothed response time plot
//!
//! Loads the recording, applies the configured filter and either saves the
//! figure to the requested path or shows it in the platform image viewer.

use super::constants::RAW_LINE_OPACITY;
use super::smoothing::{smooth, Smoothed, SmoothingConfig, SmoothingError};
use crate::common::plots::{self, padded_range, Figure, OutputFormat, FONT_FAMILY};
use crate::common::{save_figure, show_figure, DisplayError, DisplayOutcome, PlotError};
use crate::parsing::{parse_samples, ParsingError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TITLE: &str = "Response Times with Smoothing";

/// Errors that can occur while running the smoothing tool
#[derive(Error, Debug)]
pub enum SmoothingToolError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Smoothing error: {0}")]
    Smoothing(#[from] SmoothingError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Display error: {0}")]
    Viewer(#[from] DisplayError),
}

type Result<T> = core::result::Result<T, SmoothingToolError>;

/// Where the finished plot went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmoothingOutcome {
    /// Written to the requested output path
    Saved(PathBuf),
    /// Shown (or left for viewing) through the display path
    Displayed(DisplayOutcome),
}

/// Raw samples with the smoothed curve drawn over them.
#[derive(Debug, Clone)]
pub struct SmoothingFigure {
    pub raw: Vec<f64>,
    pub smoothed: Vec<f64>,
    /// Legend text of the smoothed curve
    pub label: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl SmoothingFigure {
    /// Builds the figure for `raw` samples and their smoothing result.
    pub fn new(
        raw: &[f64],
        smoothed: &Smoothed,
        config: &SmoothingConfig,
    ) -> plots::Result<Self> {
        if raw.len() != smoothed.values.len() {
            return Err(PlotError::InvalidData(format!(
                "Smoothed sequence has {} values, expected {}",
                smoothed.values.len(),
                raw.len()
            )));
        }

        let x_range = padded_range((0..raw.len()).map(|index| index as f64))?;
        let y_range = padded_range(raw.iter().chain(&smoothed.values).copied())?;

        Ok(Self {
            raw: raw.to_vec(),
            smoothed: smoothed.values.clone(),
            label: format!(
                "{} (window={})",
                config.method.description(),
                smoothed.window.size
            ),
            x_range,
            y_range,
        })
    }
}

impl Figure for SmoothingFigure {
    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> plots::Result<()> {
        let mut chart_context = ChartBuilder::on(area)
            .caption(TITLE, (FONT_FAMILY, 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(self.x_range.clone(), self.y_range.clone())
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart_context
            .configure_mesh()
            .x_desc("Request number")
            .y_desc("Response time (ms)")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .label_style((FONT_FAMILY, 25))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let raw_color = BLUE.mix(RAW_LINE_OPACITY);
        chart_context
            .draw_series(LineSeries::new(
                self.raw
                    .iter()
                    .enumerate()
                    .map(|(index, &value)| (index as f64, value)),
                raw_color.stroke_width(1),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label("Raw data")
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], raw_color.stroke_width(1))
            });

        chart_context
            .draw_series(LineSeries::new(
                self.smoothed
                    .iter()
                    .enumerate()
                    .map(|(index, &value)| (index as f64, value)),
                RED.stroke_width(2),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(self.label.as_str())
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2))
            });

        chart_context
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((FONT_FAMILY, 25))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        Ok(())
    }
}

/// Smooth `samples` and build the matching figure, printing the window
/// adjustment notice when the median filter changed the window size.
pub fn build_smoothing_figure(
    samples: &[f64],
    config: &SmoothingConfig,
) -> Result<(Smoothed, SmoothingFigure)> {
    let smoothed = smooth(samples, config)?;
    if let Some(notice) = smoothed.window.notice() {
        println!("{}", notice);
    }

    let figure = SmoothingFigure::new(samples, &smoothed, config)?;
    Ok((smoothed, figure))
}

/// Run the smoothing tool end to end
///
/// # Arguments
/// * `input_file` - Path to the response time recording
/// * `config` - Window, method and output settings from the command line
///
/// # Returns
/// * `Ok(SmoothingOutcome)` - Where the figure was written or shown
/// * `Err(SmoothingToolError)` - If any step failed; nothing is rendered in that case
pub fn run_smoothing(input_file: &Path, config: &SmoothingConfig) -> Result<SmoothingOutcome> {
    // Reject unsupported output formats before doing any work
    if let Some(output) = &config.output {
        OutputFormat::from_path(output)?;
    }

    let samples: Vec<f64> = parse_samples(input_file)?;

    println!("Smoothing {} samples from {}", samples.len(), input_file.display());
    println!("Method: {}", config.method);
    println!("Requested window: {}", config.window);
    match &config.output {
        Some(output) => println!("Output: {}", output.display()),
        None => println!("Output: interactive display"),
    }

    let (smoothed, figure) = build_smoothing_figure(&samples, config)?;
    println!("Effective window: {}", smoothed.window.size);

    match &config.output {
        Some(output) => {
            save_figure(&figure, output)?;
            Ok(SmoothingOutcome::Saved(output.clone()))
        }
        None => {
            let outcome = show_figure(&figure, "response-smoothing-")?;
            Ok(SmoothingOutcome::Displayed(outcome))
        }
    }
}
