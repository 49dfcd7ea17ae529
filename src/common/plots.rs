//! Plotting infrastructure shared by the response time tools
//!
//! Figures are drawn through the [`Figure`] trait so the same drawing code can
//! target any [`plotters`] backend. [`save_figure`] picks the backend from the
//! output file extension; charts use a fixed 1200x800 resolution.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Resolution of every rendered figure, in pixels.
pub const FIGURE_SIZE: (u32, u32) = (1200, 800);

/// Font family used for captions and labels.
pub const FONT_FAMILY: &str = "sans-serif";

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported output format for {0} (expected .png, .jpg, .jpeg, .bmp or .svg)")]
    UnsupportedFormat(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

/// Image formats a figure can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    /// Infers the output format from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            Some("bmp") => Ok(OutputFormat::Bmp),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(PlotError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Something that can draw itself onto a drawing area of any backend.
pub trait Figure {
    /// Draws the complete figure, including background, onto `area`.
    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Renders `figure` and writes it to `output_path`
///
/// The format is inferred from the extension; `.svg` goes through the SVG backend,
/// every other supported extension through the bitmap backend.
///
/// # Arguments
/// * `figure` - The figure to render
/// * `output_path` - Path where the image should be saved
///
/// # Returns
/// * `Ok(())` - If the figure was rendered and saved
/// * `Err(PlotError)` - If the format is unsupported or rendering failed
pub fn save_figure<F: Figure>(figure: &F, output_path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(output_path)?;

    match format {
        OutputFormat::Svg => {
            let area = SVGBackend::new(output_path, FIGURE_SIZE).into_drawing_area();
            render(figure, &area)
        }
        OutputFormat::Png | OutputFormat::Jpeg | OutputFormat::Bmp => {
            let area = BitMapBackend::new(output_path, FIGURE_SIZE).into_drawing_area();
            render(figure, &area)
        }
    }
}

fn render<F: Figure, DB: DrawingBackend>(
    figure: &F,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    area.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    figure.draw(area)?;

    // Ensure everything is properly rendered and saved
    area.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Computes a padded axis range covering every value in `values`
///
/// Returns [`PlotError::InvalidData`] when `values` is empty or contains no
/// finite value. A degenerate range (all values equal) is widened by one unit
/// on each side so the chart has a non-zero extent.
pub fn padded_range<I>(values: I) -> Result<Range<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    if min > max {
        return Err(PlotError::InvalidData(
            "Data contains no finite values".to_string(),
        ));
    }

    if min == max {
        return Ok((min - 1.0)..(max + 1.0));
    }

    let margin = (max - min) * 0.05;
    Ok((min - margin)..(max + margin))
}
