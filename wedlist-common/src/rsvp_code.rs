//! RSVP code generation
//!
//! An RSVP code is the public slug guests use to reach a wedding, e.g.
//! `sarah-michael-2025`. Codes are built from the couple's names and the year
//! of the wedding date. When a code is already taken the repository asks for
//! the next candidate with a numeric suffix (`sarah-michael-2025-2`, ...).

use chrono::{Datelike, NaiveDate};

/// Build the base RSVP code for a couple
///
/// Names are lower-cased; whitespace and anything other than letters, digits
/// and `-` is dropped so the code is safe to use as a URL path segment.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wedlist_common::rsvp_code::base_code;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(base_code("Sarah", "Michael", date), "sarah-michael-2025");
/// ```
pub fn base_code(bride_name: &str, groom_name: &str, wedding_date: NaiveDate) -> String {
    format!(
        "{}-{}-{}",
        slug(bride_name),
        slug(groom_name),
        wedding_date.year()
    )
}

/// Candidate code for the `attempt`-th try; the first attempt is the base code
pub fn candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

/// One name segment of the code; empty when the name has no letters or digits
pub fn slug(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_base_code_simple_names() {
        assert_eq!(base_code("Sarah", "Michael", june_2025()), "sarah-michael-2025");
    }

    #[test]
    fn test_base_code_strips_whitespace_and_punctuation() {
        assert_eq!(
            base_code("Mary Ann", "O'Brien", june_2025()),
            "maryann-obrien-2025"
        );
        assert_eq!(
            base_code(" Anne-Marie ", "José", june_2025()),
            "anne-marie-josé-2025"
        );
    }

    #[test]
    fn test_base_code_uses_wedding_year() {
        let date = NaiveDate::from_ymd_opt(2031, 12, 31).unwrap();
        assert_eq!(base_code("A", "B", date), "a-b-2031");
    }

    #[test]
    fn test_slug_of_punctuation_is_empty() {
        assert_eq!(slug("!!!"), "");
        assert_eq!(slug(" ? "), "");
        assert_eq!(slug("Zoë"), "zoë");
    }

    #[test]
    fn test_candidate_suffixes() {
        assert_eq!(candidate("a-b-2025", 1), "a-b-2025");
        assert_eq!(candidate("a-b-2025", 2), "a-b-2025-2");
        assert_eq!(candidate("a-b-2025", 10), "a-b-2025-10");
    }
}
