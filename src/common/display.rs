//! Interactive display of rendered figures
//!
//! There is no windowing backend in this crate; a figure is rendered to a PNG in
//! the system temporary directory and handed to the platform's image viewer.

use super::plots::{save_figure, Figure, PlotError};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors that can occur while preparing a figure for display
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Failed to create temporary image file: {0}")]
    TempFile(#[from] std::io::Error),

    #[error("Failed to persist temporary image file: {0}")]
    Persist(#[from] tempfile::PathPersistError),

    #[error("Failed to render figure: {0}")]
    Plot(#[from] PlotError),
}

type Result<T> = core::result::Result<T, DisplayError>;

/// How a displayed figure ended up in front of the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOutcome {
    /// The platform viewer was launched on the image.
    Opened(PathBuf),
    /// No viewer could be launched; the image stays on disk.
    Headless(PathBuf),
}

impl DisplayOutcome {
    /// Path of the rendered image.
    pub fn path(&self) -> &Path {
        match self {
            DisplayOutcome::Opened(path) | DisplayOutcome::Headless(path) => path,
        }
    }
}

/// Renders `figure` to a temporary PNG and opens it in the platform image viewer
///
/// The image is kept after the process exits so the viewer can still read it.
/// A viewer that cannot be launched is not an error; the outcome reports where
/// the image was left instead.
///
/// # Arguments
/// * `figure` - The figure to show
/// * `file_prefix` - Prefix of the temporary file name
pub fn show_figure<F: Figure>(figure: &F, file_prefix: &str) -> Result<DisplayOutcome> {
    let image_path = tempfile::Builder::new()
        .prefix(file_prefix)
        .suffix(".png")
        .tempfile()?
        .into_temp_path()
        .keep()?;

    save_figure(figure, &image_path)?;

    let outcome = match launch_viewer(&image_path) {
        Ok(()) => DisplayOutcome::Opened(image_path),
        Err(e) => {
            eprintln!("Could not open an image viewer: {}", e);
            DisplayOutcome::Headless(image_path)
        }
    };

    Ok(outcome)
}

fn launch_viewer(image_path: &Path) -> std::io::Result<()> {
    let (program, leading_args) = viewer_command();
    let status = Command::new(program)
        .args(leading_args)
        .arg(image_path)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!(
            "{} exited with {}",
            program, status
        )))
    }
}

/// Program and leading arguments used to open a file with its default application.
pub fn viewer_command() -> (&'static str, &'static [&'static str]) {
    #[cfg(target_os = "macos")]
    {
        ("open", &[])
    }
    #[cfg(windows)]
    {
        ("cmd", &["/C", "start", ""])
    }
    #[cfg(not(any(target_os = "macos", windows)))]
    {
        ("xdg-open", &[])
    }
}
