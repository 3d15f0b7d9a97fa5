// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a booking or an offer, as reported by the record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Available,
    PendingBooking,
    Booked,
}

impl BookingStatus {
    /// A record mid-way through booking is no longer freely available.
    #[inline]
    pub fn is_mid_booking(&self) -> bool {
        matches!(self, BookingStatus::PendingBooking | BookingStatus::Booked)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Available => write!(f, "available"),
            BookingStatus::PendingBooking => write!(f, "pending booking"),
            BookingStatus::Booked => write!(f, "booked"),
        }
    }
}

/// One raw sailing/offer row as supplied by an external ingestion
/// collaborator. Everything is optional; unusable rows are dropped
/// during aggregation, never rejected with an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SailingRecord {
    pub vessel: Option<String>,
    pub sail_date: Option<String>,
    pub nights: Option<u32>,
    pub return_date: Option<String>,
    pub depart_port: Option<String>,
    pub offer_code: Option<String>,
    pub offer_name: Option<String>,
    pub cabin_type: Option<String>,
    pub guest_count: Option<u32>,
    pub price: Option<f64>,
    pub onboard_credit: Option<f64>,
    pub status: Option<BookingStatus>,
}

impl SailingRecord {
    #[inline]
    pub fn vessel_trimmed(&self) -> Option<&str> {
        self.vessel.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%B %d, %Y", "%b %d, %Y"];

/// Tries the date formats the record sources are known to emit.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flexible_date_accepts_known_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(parse_flexible_date("2025-01-09"), Some(expected));
        assert_eq!(parse_flexible_date("01/09/2025"), Some(expected));
        assert_eq!(parse_flexible_date("January 9, 2025"), Some(expected));
        assert_eq!(parse_flexible_date("Jan 9, 2025"), Some(expected));
        assert_eq!(parse_flexible_date("  2025-01-09  "), Some(expected));
    }

    #[test]
    fn test_parse_flexible_date_rejects_garbage() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("TBD"), None);
        assert_eq!(parse_flexible_date("2025-13-40"), None);
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let r: SailingRecord = serde_json::from_str(r#"{"vessel": "Oasis"}"#).unwrap();
        assert_eq!(r.vessel.as_deref(), Some("Oasis"));
        assert_eq!(r.sail_date, None);
        assert_eq!(r.status, None);
    }

    #[test]
    fn test_vessel_trimmed_filters_blank_names() {
        let mut r = SailingRecord::default();
        assert_eq!(r.vessel_trimmed(), None);
        r.vessel = Some("   ".to_string());
        assert_eq!(r.vessel_trimmed(), None);
        r.vessel = Some("  Oasis of the Seas ".to_string());
        assert_eq!(r.vessel_trimmed(), Some("Oasis of the Seas"));
    }

    #[test]
    fn test_mid_booking_statuses() {
        assert!(!BookingStatus::Available.is_mid_booking());
        assert!(BookingStatus::PendingBooking.is_mid_booking());
        assert!(BookingStatus::Booked.is_mid_booking());
    }
}
