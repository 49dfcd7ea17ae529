//! File parsing functionality for response time recordings
//!
//! This module handles loading and parsing the `response_times.txt` file,
//! which holds one measurement (in milliseconds) per line.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the recording file, looked up in the working directory.
pub const INPUT_FILE_NAME: &str = "response_times.txt";

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value on line {line}: '{content}' ({reason})")]
    InvalidLine {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Input file {} contains no samples", .path.display())]
    EmptyInput { path: PathBuf },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Returns the path of the recording file inside the current working directory.
pub fn default_input_path() -> PathBuf {
    PathBuf::from(INPUT_FILE_NAME)
}

/// Parse a response time recording into a sample sequence
///
/// The file is read fully before any line is parsed, so the handle is released
/// on every path out of this function. Blank lines are skipped; every other line
/// is trimmed and parsed as `T`.
///
/// # Arguments
/// * `file_path` - Path to the recording file
///
/// # Returns
/// * `Ok(Vec<T>)` - Samples in file order
/// * `Err(ParsingError)` - If the file is missing, a line fails to parse, or no samples were found
pub fn parse_samples<T>(file_path: &Path) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let contents = fs::read_to_string(file_path).map_err(|source| ParsingError::FileRead {
        path: file_path.to_path_buf(),
        source,
    })?;

    let samples = parse_lines(&contents)?;
    if samples.is_empty() {
        return Err(ParsingError::EmptyInput {
            path: file_path.to_path_buf(),
        });
    }

    Ok(samples)
}

/// Parses already loaded text, stopping at the first invalid line.
///
/// Line numbers in errors are 1-based and count blank lines.
pub fn parse_lines<T>(contents: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut samples = Vec::new();
    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let value = line.parse::<T>().map_err(|e| ParsingError::InvalidLine {
            line: index + 1,
            content: line.to_string(),
            reason: e.to_string(),
        })?;
        samples.push(value);
    }

    Ok(samples)
}
