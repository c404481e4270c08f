//! Raw listing import and normalization.
//!
//! Scraped or hand-entered records arrive with loose shapes: numeric ids,
//! alternative key names, blank strings, missing city/province. Each record
//! is normalized into a [`Listing`]; records without an id, title or known
//! category are rejected and reported, the rest are written out as JSONL
//! the viewer can load directly.

pub mod address;
pub mod cuisine;

pub use address::{extract_location, normalize_province, Location};
pub use cuisine::detect_cuisine;

use crate::model::{Category, Cuisine, Listing, ListingId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Fatal import failures (the whole run stops).
#[derive(Debug, Error)]
pub enum ImportError {
    /// The raw input could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The normalized output could not be written.
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),

    /// A normalized listing could not be encoded.
    #[error("Failed to encode listing {id}: {message}")]
    Encode {
        /// Listing id.
        id: ListingId,
        /// Encoder message.
        message: String,
    },
}

/// Why a single record was rejected (the run continues).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Line is not a JSON object.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Required field absent or blank.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Category not one of jobs/events/dining/rentals.
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Loosely-typed record as found in raw exports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    /// String or number.
    #[serde(default, alias = "_id")]
    pub id: Option<serde_json::Value>,
    /// Category name, singular or plural.
    #[serde(default, alias = "type", alias = "kind")]
    pub category: Option<String>,
    /// Headline.
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    /// Body text.
    #[serde(default, alias = "content", alias = "details")]
    pub description: Option<String>,
    /// Street address.
    #[serde(default, alias = "location")]
    pub address: Option<String>,
    /// City, if the source had one.
    #[serde(default)]
    pub city: Option<String>,
    /// Province, name or code.
    #[serde(default, alias = "state")]
    pub province: Option<String>,
    /// Cuisine name.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Price or salary text.
    #[serde(default, alias = "salary", alias = "rent")]
    pub price: Option<String>,
    /// Contact line.
    #[serde(default, alias = "phone", alias = "email")]
    pub contact: Option<String>,
    /// Event date.
    #[serde(default, alias = "date")]
    pub event_date: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Counts reported at the end of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Records written.
    pub accepted: usize,
    /// Records skipped.
    pub rejected: usize,
}

/// Normalize one raw record.
pub fn normalize(raw: RawListing) -> Result<Listing, RecordError> {
    let id = raw
        .id
        .as_ref()
        .and_then(id_text)
        .and_then(|s| ListingId::new(s).ok())
        .ok_or(RecordError::MissingField("id"))?;
    let title = clean(raw.title).ok_or(RecordError::MissingField("title"))?;
    let category_raw = clean(raw.category).ok_or(RecordError::MissingField("category"))?;
    let category =
        Category::parse(&category_raw).ok_or(RecordError::UnknownCategory(category_raw))?;

    let mut listing = Listing::new(id, category, title);
    listing.description = clean(raw.description).unwrap_or_default();
    listing.address = clean(raw.address);
    listing.price = clean(raw.price);
    listing.contact = clean(raw.contact);

    let found = listing
        .address
        .as_deref()
        .map(extract_location)
        .unwrap_or_default();
    listing.city = clean(raw.city).or_else(|| found.city.map(str::to_string));
    listing.province = clean(raw.province)
        .map(|p| normalize_province(&p).map_or(p, str::to_string))
        .or_else(|| found.province.map(str::to_string));

    if category == Category::Dining {
        listing.cuisine = clean(raw.cuisine)
            .and_then(|c| parse_cuisine(&listing.id, &c))
            .or_else(|| detect_cuisine(&format!("{} {}", listing.title, listing.description)));
    }

    listing.event_date = clean(raw.event_date).and_then(|d| parse_date(&listing.id, &d));
    listing.created_at = clean(raw.created_at).and_then(|d| parse_timestamp(&listing.id, &d));

    Ok(listing)
}

/// Decode and normalize one JSONL line.
pub fn normalize_line(line: &str) -> Result<Listing, RecordError> {
    let raw: RawListing =
        serde_json::from_str(line).map_err(|e| RecordError::InvalidJson(e.to_string()))?;
    normalize(raw)
}

/// Normalize every line of `reader`, writing accepted listings to `writer`.
///
/// Blank lines are skipped silently; rejected records are logged.
pub fn import<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    source: &Path,
) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source_err| ImportError::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        match normalize_line(&line) {
            Ok(listing) => {
                let encoded =
                    serde_json::to_string(&listing).map_err(|e| ImportError::Encode {
                        id: listing.id.clone(),
                        message: e.to_string(),
                    })?;
                writeln!(writer, "{encoded}").map_err(ImportError::Write)?;
                summary.accepted += 1;
            }
            Err(err) => {
                warn!(line = index + 1, error = %err, "rejected record");
                summary.rejected += 1;
            }
        }
    }

    writer.flush().map_err(ImportError::Write)?;
    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        source = %source.display(),
        "import finished"
    );
    Ok(summary)
}

/// Import `input` into `output` (stdout when `None`).
pub fn import_path(input: &Path, output: Option<&Path>) -> Result<ImportSummary, ImportError> {
    let file = File::open(input).map_err(|source| ImportError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    match output {
        Some(path) => {
            let out = File::create(path).map_err(ImportError::Write)?;
            import(reader, BufWriter::new(out), input)
        }
        None => import(reader, io::stdout().lock(), input),
    }
}

fn id_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_cuisine(id: &ListingId, raw: &str) -> Option<Cuisine> {
    let parsed = detect_cuisine(raw);
    if parsed.is_none() {
        warn!(%id, raw, "unrecognised cuisine, falling back to text detection");
    }
    parsed
}

fn parse_date(id: &ListingId, raw: &str) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    if parsed.is_none() {
        warn!(%id, raw, "dropping unparseable event date");
    }
    parsed
}

fn parse_timestamp(id: &ListingId, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        });
    if parsed.is_none() {
        warn!(%id, raw, "dropping unparseable creation timestamp");
    }
    parsed
}
