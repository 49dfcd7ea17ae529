//! Sliding-window smoothing of response time sequences
//!
//! Two filters are provided:
//! - [`moving_average`]: uniform-kernel convolution with same-length output
//! - [`median_filter`]: sliding median
//!
//! Both treat samples outside the sequence as zeros, so values near the edges
//! are pulled towards zero.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while resolving or applying a smoothing filter
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SmoothingError {
    #[error("Smoothing window must be at least 1")]
    ZeroWindow,

    #[error("Cannot smooth an empty sample sequence")]
    EmptyInput,
}

type Result<T> = core::result::Result<T, SmoothingError>;

/// Smoothing filter applied to the sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMethod {
    /// Moving average (uniform kernel)
    #[default]
    Mean,
    /// Sliding median
    Median,
}

impl SmoothingMethod {
    /// Human readable filter name used in plot legends.
    pub fn description(self) -> &'static str {
        match self {
            SmoothingMethod::Mean => "Moving average",
            SmoothingMethod::Median => "Median filter",
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingMethod::Mean => f.write_str("mean"),
            SmoothingMethod::Median => f.write_str("median"),
        }
    }
}

impl FromStr for SmoothingMethod {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(SmoothingMethod::Mean),
            "median" => Ok(SmoothingMethod::Median),
            other => Err(format!(
                "unknown smoothing method '{}' (expected 'mean' or 'median')",
                other
            )),
        }
    }
}

/// Settings for one run of the smoothing tool, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothingConfig {
    /// Requested window size before clamping
    pub window: usize,
    pub method: SmoothingMethod,
    /// Image to write; [`None`] shows the plot interactively
    pub output: Option<PathBuf>,
}

/// Window size actually used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveWindow {
    pub size: usize,
    /// Set when the median filter had to bump an even window to the next odd size
    pub adjusted_from: Option<usize>,
}

impl EffectiveWindow {
    /// Informational message describing an odd-size adjustment, if one happened.
    pub fn notice(&self) -> Option<String> {
        self.adjusted_from.map(|original| {
            format!(
                "Median filter requires an odd window size; using {} instead of {}",
                self.size, original
            )
        })
    }
}

/// Clamps the requested window to the sample count and, for the median
/// filter, bumps an even size up to the next odd one.
pub fn resolve_window(
    requested: usize,
    sample_count: usize,
    method: SmoothingMethod,
) -> Result<EffectiveWindow> {
    if requested == 0 {
        return Err(SmoothingError::ZeroWindow);
    }
    if sample_count == 0 {
        return Err(SmoothingError::EmptyInput);
    }

    let clamped = requested.min(sample_count);
    if method == SmoothingMethod::Median && clamped % 2 == 0 {
        return Ok(EffectiveWindow {
            size: clamped + 1,
            adjusted_from: Some(clamped),
        });
    }

    Ok(EffectiveWindow {
        size: clamped,
        adjusted_from: None,
    })
}

/// Same-length convolution of `samples` with a normalized uniform kernel
///
/// Output `i` is the sum of the window ending `(window - 1) / 2` samples after `i`,
/// divided by `window`. Positions outside the sequence count as zero, so the
/// divisor never shrinks at the edges. A zero window is treated as one.
pub fn moving_average(samples: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let len = samples.len();
    let lead = (window - 1) / 2;
    let scale = 1.0 / window as f64;

    // Each window is summed on its own; no output sees samples outside it
    (0..len)
        .map(|i| {
            let end = (i + lead).min(len - 1);
            let start = (i + lead + 1).saturating_sub(window);
            samples[start..=end].iter().sum::<f64>() * scale
        })
        .collect()
}

/// Sliding median of `samples` with a kernel of `kernel_size` samples
///
/// The kernel is centred on each sample; positions outside the sequence count
/// as zero. For an even kernel the window reaches one sample further back than
/// forward and the two middle values are averaged. A zero kernel is treated as one.
pub fn median_filter(samples: &[f64], kernel_size: usize) -> Vec<f64> {
    let kernel_size = kernel_size.max(1);
    let half = kernel_size / 2;
    let len = samples.len() as isize;

    let mut window = Vec::with_capacity(kernel_size);
    (0..len)
        .map(|i| {
            window.clear();
            let first = i - half as isize;
            window.extend((first..first + kernel_size as isize).map(|position| {
                if (0..len).contains(&position) {
                    samples[position as usize]
                } else {
                    0.0
                }
            }));
            median_of(&mut window)
        })
        .collect()
}

fn median_of(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(f64::total_cmp);

    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        values[middle]
    } else {
        (values[middle - 1] + values[middle]) / 2.0
    }
}

/// Result of smoothing a sample sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Smoothed {
    pub values: Vec<f64>,
    pub window: EffectiveWindow,
}

/// Resolves the effective window for `config` and applies its filter to `samples`.
pub fn smooth(samples: &[f64], config: &SmoothingConfig) -> Result<Smoothed> {
    let window = resolve_window(config.window, samples.len(), config.method)?;

    let values = match config.method {
        SmoothingMethod::Mean => moving_average(samples, window.size),
        SmoothingMethod::Median => median_filter(samples, window.size),
    };

    Ok(Smoothed { values, window })
}
