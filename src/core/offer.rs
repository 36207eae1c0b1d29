//! Offer rows and CSV loading.
//!
//! The header is validated once, up front, before any row is read. Rows are
//! then deserialized by column name, so column order and extra columns do
//! not matter, and short records leave their trailing fields empty. When a
//! column name repeats, its last occurrence supplies the value.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Columns every offers CSV must declare, in report order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "slug",
    "type",
    "keyword",
    "intent",
    "title",
    "h1",
    "meta_title",
    "meta_desc",
    "pick_1",
    "pick_2",
    "pick_3",
    "persona",
    "USP_1",
    "USP_2",
    "USP_3",
    "cta_text",
    "aff_link_1",
    "aff_link_2",
    "aff_link_3",
    "status",
];

/// One CSV record describing a set of recommended alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OfferRow {
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub keyword: String,
    pub intent: String,
    pub title: String,
    pub h1: String,
    pub meta_title: String,
    pub meta_desc: String,
    pub pick_1: String,
    pub pick_2: String,
    pub pick_3: String,
    pub persona: String,
    #[serde(rename = "USP_1")]
    pub usp_1: String,
    #[serde(rename = "USP_2")]
    pub usp_2: String,
    #[serde(rename = "USP_3")]
    pub usp_3: String,
    pub cta_text: String,
    pub aff_link_1: String,
    pub aff_link_2: String,
    pub aff_link_3: String,
    pub status: String,
}

impl OfferRow {
    /// Rows without a keyword never produce a page.
    pub fn has_keyword(&self) -> bool {
        !self.keyword.trim().is_empty()
    }
}

/// A parsed row together with the physical line it started on.
#[derive(Debug, Clone)]
pub struct OfferRecord {
    pub line: u64,
    pub row: OfferRow,
}

/// Required columns absent from `headers`, in [`REQUIRED_COLUMNS`] order.
pub fn missing_columns<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.contains(*required))
        .map(|required| required.to_string())
        .collect()
}

/// Read and validate an offers CSV.
///
/// Fails without reading any row when the file is absent, has no header, or
/// the header lacks a required column.
pub fn load(path: &Path) -> Result<Vec<OfferRecord>> {
    let display = path.display().to_string();

    if !path.is_file() {
        return Err(Error::input_not_found(display));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("open {}", display))))?;

    let headers = reader
        .headers()
        .map_err(|e| csv_error(&display, e))?
        .clone();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::csv_missing_header(display));
    }

    let missing = missing_columns(headers.iter());
    if !missing.is_empty() {
        return Err(Error::csv_missing_columns(display, missing));
    }

    let fields = last_wins_headers(&headers);
    let mut records = Vec::new();
    for result in reader.records() {
        let mut record = result.map_err(|e| csv_error(&display, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: OfferRow = record
            .deserialize(Some(&fields))
            .map_err(|e| Error::csv_invalid_record(&display, Some(line), e.to_string()))?;
        records.push(OfferRecord { line, row });
    }

    Ok(records)
}

/// Rename every earlier copy of a repeated column so each name is unique.
fn last_wins_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if headers.iter().skip(idx + 1).any(|later| later == name) {
                format!("{}#{}", name, idx)
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn csv_error(path: &str, err: csv::Error) -> Error {
    if let csv::ErrorKind::Io(io) = err.kind() {
        return Error::internal_io(io.to_string(), Some(format!("read {}", path)));
    }
    let line = err.position().map(|p| p.line());
    Error::csv_invalid_record(path, line, err.to_string())
}
