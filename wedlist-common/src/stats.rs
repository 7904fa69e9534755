//! RSVP statistics for a wedding

use serde::{Deserialize, Serialize};

/// Guest counts by RSVP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingStats {
    pub total_guests: i64,
    pub confirmed: i64,
    pub pending: i64,
    pub declined: i64,
    pub response_rate: i64,
}

impl WeddingStats {
    pub fn from_counts(confirmed: i64, pending: i64, declined: i64) -> Self {
        Self {
            total_guests: confirmed + pending + declined,
            confirmed,
            pending,
            declined,
            response_rate: response_rate(confirmed, pending, declined),
        }
    }
}

/// Percentage of guests who answered, rounded to the nearest integer
///
/// `round((confirmed + declined) / total * 100)`, with halves rounded up and
/// 0 when there are no guests.
pub fn response_rate(confirmed: i64, pending: i64, declined: i64) -> i64 {
    let total = confirmed + pending + declined;
    if total <= 0 {
        return 0;
    }
    let responded = confirmed + declined;
    // round(100 * responded / total) without floats
    (200 * responded + total) / (2 * total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_rate_reference_cases() {
        assert_eq!(response_rate(0, 0, 0), 0);
        // nobody answered
        assert_eq!(response_rate(0, 5, 0), 0);
        assert_eq!(response_rate(3, 5, 2), 50);
        assert_eq!(response_rate(10, 0, 0), 100);
    }

    #[test]
    fn test_response_rate_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(response_rate(1, 7, 0), 13);
        // 1/3 = 33.33%
        assert_eq!(response_rate(0, 2, 1), 33);
        // 2/3 = 66.67%
        assert_eq!(response_rate(1, 1, 1), 67);
    }

    #[test]
    fn test_response_rate_matches_float_formula() {
        for confirmed in 0..12 {
            for pending in 0..12 {
                for declined in 0..12 {
                    let total = confirmed + pending + declined;
                    let expected = if total == 0 {
                        0
                    } else {
                        ((confirmed + declined) as f64 / total as f64 * 100.0).round() as i64
                    };
                    assert_eq!(
                        response_rate(confirmed, pending, declined),
                        expected,
                        "confirmed={} pending={} declined={}",
                        confirmed,
                        pending,
                        declined
                    );
                }
            }
        }
    }

    #[test]
    fn test_stats_from_counts() {
        let stats = WeddingStats::from_counts(1, 0, 0);
        assert_eq!(stats.total_guests, 1);
        assert_eq!(stats.response_rate, 100);
    }
}
