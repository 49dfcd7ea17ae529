//! Cached vs. uncached response time histogram
//!
//! Samples are split at [`CACHE_THRESHOLD_MS`] and each bucket is binned over its
//! own value range, then both are drawn as overlapping semi-transparent bars.

use super::constants::{CACHE_THRESHOLD_MS, HISTOGRAM_BINS, HISTOGRAM_OPACITY};
use crate::common::buckets::{format_bucket_table, BucketSummary};
use crate::common::plots::{self, padded_range, Figure, FONT_FAMILY};
use crate::common::{show_figure, DisplayError, DisplayOutcome, PlotError};
use crate::parsing::{parse_samples, ParsingError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const TITLE: &str = "Response Time Comparison on /article/random";
const CACHED_LABEL: &str = "With caching";
const UNCACHED_LABEL: &str = "Without caching";

/// Bar colour of the cached bucket.
const ORANGE: RGBColor = RGBColor(255, 127, 14);

/// Errors that can occur while running the histogram tool
#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plot error: {0}")]
    Plot(#[from] PlotError),

    #[error("Display error: {0}")]
    Viewer(#[from] DisplayError),
}

type Result<T> = core::result::Result<T, HistogramError>;

/// Samples split by the cache threshold, each in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BucketedSamples {
    /// Samples strictly below the threshold
    pub cached: Vec<i64>,
    /// Samples at or above the threshold
    pub uncached: Vec<i64>,
}

impl BucketedSamples {
    /// Total number of samples across both buckets.
    pub fn len(&self) -> usize {
        self.cached.len() + self.uncached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-bucket counts for the summary table.
    pub fn summary(&self, threshold: i64) -> BucketSummary {
        BucketSummary {
            threshold,
            cached: self.cached.len(),
            uncached: self.uncached.len(),
        }
    }
}

/// Splits `samples` into values below `threshold` and values at or above it.
pub fn partition_samples(samples: &[i64], threshold: i64) -> BucketedSamples {
    let (cached, uncached): (Vec<i64>, Vec<i64>) =
        samples.iter().partition(|&&value| value < threshold);
    BucketedSamples { cached, uncached }
}

/// Equal-width histogram over a single bucket
///
/// Bins are half-open `[lo, hi)` except the last, which also includes its upper
/// edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges
    pub edges: Vec<f64>,
    /// Number of samples per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins spanning their min..max
    ///
    /// Returns [`None`] for empty input or zero bins. When every value is equal the
    /// range is widened to `[value - 0.5, value + 0.5]`.
    pub fn from_samples(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let (mut first, mut last) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &value| {
                (lo.min(value), hi.max(value))
            });
        if first == last {
            first -= 0.5;
            last += 0.5;
        }

        let step = (last - first) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| first + i as f64 * step).collect();
        edges[bins] = last;

        let mut counts = vec![0usize; bins];
        for &value in values {
            counts[Self::bin_index(&edges, value)] += 1;
        }

        Some(Self { edges, counts })
    }

    fn bin_index(edges: &[f64], value: f64) -> usize {
        let bins = edges.len() - 1;
        let first = edges[0];
        let last = edges[bins];

        let mut index = (((value - first) / (last - first)) * bins as f64) as usize;
        index = index.min(bins - 1);

        // Guard against rounding placing a value on the wrong side of an edge
        if index > 0 && value < edges[index] {
            index -= 1;
        } else if index < bins - 1 && value >= edges[index + 1] {
            index += 1;
        }

        index
    }

    /// Iterates bins as `(lower edge, upper edge, count)`.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// One labelled set of histogram bars.
#[derive(Debug, Clone)]
pub struct HistogramSeries {
    pub label: &'static str,
    pub color: RGBColor,
    /// [`None`] when the bucket is empty; the legend entry is still drawn
    pub histogram: Option<Histogram>,
}

/// Overlapping histograms of the two buckets on shared axes.
#[derive(Debug, Clone)]
pub struct HistogramFigure {
    pub series: Vec<HistogramSeries>,
    pub x_range: Range<f64>,
    pub y_max: f64,
}

impl HistogramFigure {
    /// Bins both buckets and computes shared axis ranges
    ///
    /// The uncached bucket is listed first so the cached bars are drawn on top.
    pub fn from_buckets(buckets: &BucketedSamples, bins: usize) -> plots::Result<Self> {
        let series = vec![
            HistogramSeries {
                label: UNCACHED_LABEL,
                color: BLUE,
                histogram: Histogram::from_samples(&to_f64(&buckets.uncached), bins),
            },
            HistogramSeries {
                label: CACHED_LABEL,
                color: ORANGE,
                histogram: Histogram::from_samples(&to_f64(&buckets.cached), bins),
            },
        ];

        let x_range = padded_range(
            series
                .iter()
                .filter_map(|s| s.histogram.as_ref())
                .flat_map(|h| h.edges.iter().copied()),
        )?;

        let max_count = series
            .iter()
            .filter_map(|s| s.histogram.as_ref())
            .map(Histogram::max_count)
            .max()
            .unwrap_or(0);
        let y_max = (max_count as f64 * 1.05).max(1.0);

        Ok(Self {
            series,
            x_range,
            y_max,
        })
    }
}

impl Figure for HistogramFigure {
    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> plots::Result<()> {
        let mut chart_context = ChartBuilder::on(area)
            .caption(TITLE, (FONT_FAMILY, 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(self.x_range.clone(), 0.0..self.y_max)
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        chart_context
            .configure_mesh()
            .x_desc("Response time (ms)")
            .y_desc("Frequency")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .label_style((FONT_FAMILY, 25))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        for series in &self.series {
            let color = series.color;
            let bars = series
                .histogram
                .iter()
                .flat_map(|h| h.bars())
                .map(move |(lo, hi, count)| {
                    Rectangle::new(
                        [(lo, 0.0), (hi, count as f64)],
                        color.mix(HISTOGRAM_OPACITY).filled(),
                    )
                });

            chart_context
                .draw_series(bars)
                .map_err(|e| PlotError::Drawing(e.to_string()))?
                .label(series.label)
                .legend(move |(x, y)| {
                    Rectangle::new(
                        [(x, y - 6), (x + 20, y + 6)],
                        color.mix(HISTOGRAM_OPACITY).filled(),
                    )
                });
        }

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

fn to_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&value| value as f64).collect()
}

/// Run the histogram tool end to end
///
/// Loads integer samples from `input_file`, prints the bucket table, then shows
/// the overlapping histograms in the platform image viewer.
///
/// # Arguments
/// * `input_file` - Path to the response time recording
///
/// # Returns
/// * `Ok(DisplayOutcome)` - Where the rendered figure ended up
/// * `Err(HistogramError)` - If loading, rendering, or display preparation failed
pub fn run_histogram(input_file: &Path) -> Result<DisplayOutcome> {
    let samples: Vec<i64> = parse_samples(input_file)?;
    let buckets = partition_samples(&samples, CACHE_THRESHOLD_MS);

    println!(
        "{}",
        format_bucket_table(&buckets.summary(CACHE_THRESHOLD_MS), "Response Time Buckets")
    );

    let figure = HistogramFigure::from_buckets(&buckets, HISTOGRAM_BINS)?;
    let outcome = show_figure(&figure, "response-histogram-")?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn partition_splits_at_threshold_and_keeps_order() {
        let samples = vec![49, 50, 3, 120, 51, 0, 49];
        let buckets = partition_samples(&samples, 50);

        assert_eq!(buckets.cached, vec![49, 3, 0, 49]);
        assert_eq!(buckets.uncached, vec![50, 120, 51]);
        assert_eq!(buckets.len(), samples.len());
    }

    #[rstest]
    #[case::all_cached(vec![1, 2, 3])]
    #[case::all_uncached(vec![50, 500, 5000])]
    #[case::negative_values(vec![-10, 60, -1, 49])]
    #[case::mixed(vec![10, 75, 20, 90, 50, 49, 1000])]
    fn partition_covers_every_sample(#[case] samples: Vec<i64>) {
        let buckets = partition_samples(&samples, CACHE_THRESHOLD_MS);

        assert_eq!(buckets.cached.len() + buckets.uncached.len(), samples.len());
        assert!(buckets.cached.iter().all(|&v| v < CACHE_THRESHOLD_MS));
        assert!(buckets.uncached.iter().all(|&v| v >= CACHE_THRESHOLD_MS));
    }

    #[test]
    fn summary_reports_bucket_counts() {
        let buckets = partition_samples(&[10, 20, 60, 70, 80], 50);
        let summary = buckets.summary(50);

        assert_eq!(summary.cached, 2);
        assert_eq!(summary.uncached, 3);
        assert_eq!(summary.total(), buckets.len());
        assert_eq!(summary.rows()[0].share, "40.00%");
    }

    #[test]
    fn histogram_counts_sum_to_sample_count() {
        let values: Vec<f64> = (0..1000).map(|v| (v % 97) as f64).collect();
        let histogram = Histogram::from_samples(&values, HISTOGRAM_BINS).unwrap();

        assert_eq!(histogram.edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(histogram.counts.len(), HISTOGRAM_BINS);
        assert_eq!(histogram.total(), values.len());
    }

    #[test]
    fn histogram_places_maximum_in_last_bin() {
        let values = vec![0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let histogram = Histogram::from_samples(&values, 5).unwrap();

        assert_eq!(histogram.edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(histogram.counts, vec![2, 2, 1, 0, 1]);
    }

    #[test]
    fn histogram_widens_single_value_range() {
        let histogram = Histogram::from_samples(&[7.0, 7.0, 7.0], 2).unwrap();

        assert_eq!(histogram.edges, vec![6.5, 7.0, 7.5]);
        assert_eq!(histogram.counts, vec![0, 3]);
    }

    #[test]
    fn histogram_of_nothing_is_none() {
        assert!(Histogram::from_samples(&[], HISTOGRAM_BINS).is_none());
        assert!(Histogram::from_samples(&[1.0], 0).is_none());
    }

    #[test]
    fn bars_follow_edges() {
        let histogram = Histogram::from_samples(&[0.0, 4.0], 2).unwrap();
        let bars: Vec<_> = histogram.bars().collect();

        assert_eq!(bars, vec![(0.0, 2.0, 1), (2.0, 4.0, 1)]);
    }

    #[test]
    fn figure_bins_each_bucket_independently() {
        let buckets = partition_samples(&[10, 20, 30, 60, 80, 100], 50);
        let figure = HistogramFigure::from_buckets(&buckets, HISTOGRAM_BINS).unwrap();

        assert_eq!(figure.series.len(), 2);
        let uncached = figure.series[0].histogram.as_ref().unwrap();
        let cached = figure.series[1].histogram.as_ref().unwrap();

        assert_eq!(figure.series[0].label, UNCACHED_LABEL);
        assert_eq!(uncached.edges[0], 60.0);
        assert_eq!(uncached.edges[HISTOGRAM_BINS], 100.0);
        assert_eq!(cached.edges[0], 10.0);
        assert_eq!(cached.edges[HISTOGRAM_BINS], 30.0);

        assert!(figure.x_range.start < 10.0);
        assert!(figure.x_range.end > 100.0);
        assert!(figure.y_max >= 1.0);
    }

    #[test]
    fn figure_keeps_empty_bucket_series() {
        let buckets = partition_samples(&[1, 2, 3], 50);
        let figure = HistogramFigure::from_buckets(&buckets, HISTOGRAM_BINS).unwrap();

        assert!(figure.series[0].histogram.is_none());
        assert!(figure.series[1].histogram.is_some());
    }

    #[test]
    fn figure_rejects_no_samples() {
        let result = HistogramFigure::from_buckets(&BucketedSamples::default(), HISTOGRAM_BINS);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn missing_input_fails_before_display() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let result = run_histogram(&temp_dir.path().join("response_times.txt"));

        assert!(matches!(
            result,
            Err(HistogramError::Parsing(ParsingError::FileRead { .. }))
        ));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn figure_renders_to_png() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let output_path = temp_dir.path().join("histogram.png");

        let buckets = partition_samples(&[5, 12, 40, 55, 70, 120, 49, 50], 50);
        let figure = HistogramFigure::from_buckets(&buckets, HISTOGRAM_BINS).unwrap();
        crate::common::save_figure(&figure, &output_path).unwrap();

        assert!(output_path.exists());
    }
}
