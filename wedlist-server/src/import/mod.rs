//! CSV guest import
//!
//! Pipeline: parse the upload into rows → validate every row → one bulk
//! insert. Validation finishes for the whole file before anything is written,
//! so a single bad row leaves the guest list untouched.

use serde::Serialize;
use tracing::{info, warn};
use wedlist_common::db::{Guest, NewGuest, Wedding};
use wedlist_common::{Error, Result};

use crate::db::Repository;

pub mod validator;

pub use validator::{validate_guest_row, RawRow, RowError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Result of a successful import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported_count: usize,
    pub guests: Vec<Guest>,
}

/// Parse CSV bytes into header → cell rows
///
/// The first record is the header row. Blank lines are skipped and cells are
/// trimmed. Ragged rows and invalid UTF-8 are parse errors.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::Parse(e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(e.to_string()))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Validate all rows, stopping at the first bad one
pub fn validate_rows(wedding_id: i64, rows: &[RawRow]) -> Result<Vec<NewGuest>> {
    rows.iter()
        .enumerate()
        .map(|(index, raw)| validate_guest_row(wedding_id, index + 1, raw))
        .collect::<std::result::Result<Vec<_>, RowError>>()
        .map_err(|e| {
            warn!("Rejected guest import for wedding {}: {}", wedding_id, e);
            Error::from(e)
        })
}

/// Import a CSV upload into `wedding`
///
/// The caller has already checked that the wedding belongs to the requester.
pub async fn ingest(repo: &Repository, wedding: &Wedding, bytes: &[u8]) -> Result<ImportOutcome> {
    let rows = parse_csv(bytes)?;
    let guests = validate_rows(wedding.id, &rows)?;
    let guests = repo.insert_guests(wedding, guests).await?;

    info!(
        "Imported {} guests from CSV into wedding {}",
        guests.len(),
        wedding.id
    );

    Ok(ImportOutcome {
        imported_count: guests.len(),
        guests,
    })
}
