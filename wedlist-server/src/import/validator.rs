//! Guest row validation
//!
//! Turns one CSV row (header name → cell) into a [`NewGuest`]. Headers are
//! matched loosely: case, spaces, underscores and punctuation are ignored, so
//! `firstName`, `First Name` and `first_name` all name the same field. When a
//! row carries two spellings of a field, the exact lowerCamel header wins if
//! its cell is non-empty.

use std::collections::BTreeMap;
use thiserror::Error;
use wedlist_common::db::NewGuest;
use wedlist_common::Error;

/// One parsed CSV row: header name → cell value
pub type RawRow = BTreeMap<String, String>;

const REQUIRED_FIELDS: [&str; 3] = ["firstName", "lastName", "phone"];

/// A row that cannot become a guest
#[derive(Debug, Clone, Error)]
#[error("Invalid guest data in row {row}: missing {}; row: {}", .missing.join(", "), raw_json(.raw))]
pub struct RowError {
    /// 1-based data row number (the header row is not counted)
    pub row: usize,
    pub missing: Vec<&'static str>,
    pub raw: RawRow,
}

impl From<RowError> for Error {
    fn from(err: RowError) -> Self {
        Error::Validation(err.to_string())
    }
}

/// Validate one row for `wedding_id`
///
/// Required: `firstName`, `lastName`, `phone` (non-empty after trimming).
/// Optional: `email`, `address`, `notes`, stored as empty strings when absent.
/// Any `weddingId` column in the row is ignored.
pub fn validate_guest_row(wedding_id: i64, row: usize, raw: &RawRow) -> Result<NewGuest, RowError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| field_value(raw, field).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(RowError {
            row,
            missing,
            raw: raw.clone(),
        });
    }

    let text = |field: &str| field_value(raw, field).unwrap_or_default().to_string();

    let mut guest = NewGuest::new(wedding_id, text("firstName"), text("lastName"), text("phone"));
    guest.email = Some(text("email"));
    guest.address = Some(text("address"));
    guest.notes = Some(text("notes"));

    Ok(guest)
}

/// Trimmed, non-empty value for `canonical`, trying the exact header first
fn field_value<'a>(raw: &'a RawRow, canonical: &str) -> Option<&'a str> {
    let non_empty = |v: &'a String| Some(v.trim()).filter(|v| !v.is_empty());

    if let Some(value) = raw.get(canonical).and_then(non_empty) {
        return Some(value);
    }

    let wanted = normalize_header(canonical);
    raw.iter()
        .filter(|(header, _)| normalize_header(header) == wanted)
        .find_map(|(_, value)| non_empty(value))
}

/// `"First Name"` → `"firstname"`, `"first_name"` → `"firstname"`
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn raw_json(raw: &RawRow) -> String {
    serde_json::to_string(raw).unwrap_or_else(|_| format!("{:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_accepts_camel_case_headers() {
        let raw = row(&[
            ("firstName", "Emily"),
            ("lastName", "Johnson"),
            ("phone", "5551234567"),
        ]);
        let guest = validate_guest_row(3, 1, &raw).unwrap();

        assert_eq!(guest.wedding_id, 3);
        assert_eq!(guest.first_name, "Emily");
        assert_eq!(guest.last_name, "Johnson");
        assert_eq!(guest.phone, "5551234567");
        assert_eq!(guest.email.as_deref(), Some(""));
        assert_eq!(guest.notes.as_deref(), Some(""));
    }

    #[test]
    fn test_accepts_title_case_headers() {
        let raw = row(&[
            ("First Name", "Emily"),
            ("Last Name", "Johnson"),
            ("Phone", "5551234567"),
            ("Email", "emily@example.com"),
            ("Address", "1 Main St"),
            ("Notes", "plus one"),
        ]);
        let guest = validate_guest_row(3, 1, &raw).unwrap();

        assert_eq!(guest.first_name, "Emily");
        assert_eq!(guest.email.as_deref(), Some("emily@example.com"));
        assert_eq!(guest.address.as_deref(), Some("1 Main St"));
        assert_eq!(guest.notes.as_deref(), Some("plus one"));
    }

    #[test]
    fn test_accepts_other_spellings() {
        let raw = row(&[
            ("first_name", "Emily"),
            ("LAST NAME", "Johnson"),
            ("  phone ", "555"),
        ]);
        assert!(validate_guest_row(1, 1, &raw).is_ok());
    }

    #[test]
    fn test_canonical_header_wins() {
        let raw = row(&[
            ("firstName", "Emily"),
            ("First Name", "Em"),
            ("lastName", "Johnson"),
            ("phone", "555"),
        ]);
        let guest = validate_guest_row(1, 1, &raw).unwrap();
        assert_eq!(guest.first_name, "Emily");
    }

    #[test]
    fn test_empty_canonical_falls_back_to_title_case() {
        let raw = row(&[
            ("firstName", ""),
            ("First Name", "Emily"),
            ("lastName", "Johnson"),
            ("phone", "555"),
        ]);
        let guest = validate_guest_row(1, 1, &raw).unwrap();
        assert_eq!(guest.first_name, "Emily");
    }

    #[test]
    fn test_trims_values() {
        let raw = row(&[
            ("firstName", "  Emily "),
            ("lastName", "Johnson"),
            ("phone", " 555 "),
        ]);
        let guest = validate_guest_row(1, 1, &raw).unwrap();
        assert_eq!(guest.first_name, "Emily");
        assert_eq!(guest.phone, "555");
    }

    #[test]
    fn test_rejects_missing_phone_with_row_details() {
        let raw = row(&[("firstName", "Emily"), ("lastName", "Johnson"), ("phone", "  ")]);
        let err = validate_guest_row(1, 4, &raw).unwrap_err();

        assert_eq!(err.row, 4);
        assert_eq!(err.missing, vec!["phone"]);
        assert_eq!(err.raw, raw);

        let message = err.to_string();
        assert!(message.contains("row 4"), "{}", message);
        assert!(message.contains("\"firstName\":\"Emily\""), "{}", message);
    }

    #[test]
    fn test_lists_every_missing_field() {
        let err = validate_guest_row(1, 1, &row(&[("email", "x@example.com")])).unwrap_err();
        assert_eq!(err.missing, vec!["firstName", "lastName", "phone"]);
    }

    #[test]
    fn test_ignores_wedding_id_column() {
        let raw = row(&[
            ("weddingId", "999"),
            ("firstName", "Emily"),
            ("lastName", "Johnson"),
            ("phone", "555"),
        ]);
        let guest = validate_guest_row(7, 1, &raw).unwrap();
        assert_eq!(guest.wedding_id, 7);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header("first_name"), "firstname");
        assert_eq!(normalize_header("firstName"), "firstname");
    }
}
