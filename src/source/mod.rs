//! Listing input sources.
//!
//! This module provides input sources for JSONL listing data:
//! - File loading for a listing export on disk
//! - Stdin for piped input
//! - Unified InputSource enum for both

use crate::model::error::{InputError, ParseError};
use crate::model::Listing;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Decoded listings plus the lines that failed to decode.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Listings in file order.
    pub listings: Vec<Listing>,
    /// Per-line decode failures (non-fatal).
    pub errors: Vec<ParseError>,
}

/// Unified input source for JSONL listing data.
#[derive(Debug)]
pub enum InputSource {
    /// Listing file on disk.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read and decode the whole input.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for I/O errors.
    pub fn load(self) -> Result<LoadReport, InputError> {
        match self {
            InputSource::File(f) => f.load(),
            InputSource::Stdin(s) => s.load(),
        }
    }
}

/// Detect and create appropriate input source.
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
/// Returns `InputError::FileNotFound` if the file does not exist.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

/// Decode JSONL listings, one per line.
///
/// Blank lines are skipped. Lines that fail to decode are logged and
/// collected in [`LoadReport::errors`]; decoding continues.
///
/// # Errors
///
/// Returns `InputError::Io` if reading fails.
pub fn decode_listings<R: BufRead>(reader: R) -> Result<LoadReport, InputError> {
    let mut report = LoadReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        match decode_line(&line, line_number) {
            Ok(listing) => report.listings.push(listing),
            Err(err) => {
                warn!("Parse error at line {}: {}", err.line(), err);
                report.errors.push(err);
            }
        }
    }

    debug!(
        listings = report.listings.len(),
        errors = report.errors.len(),
        "listings decoded"
    );
    Ok(report)
}

fn decode_line(line: &str, line_number: usize) -> Result<Listing, ParseError> {
    let listing: Listing =
        serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;
    if listing.title.trim().is_empty() {
        return Err(ParseError::MissingField {
            line: line_number,
            field: "title",
        });
    }
    Ok(listing)
}
