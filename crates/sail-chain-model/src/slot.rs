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

use crate::{err::EmptyOfferListError, offer::Offer};
use sail_chain_core::prelude::{Day, DayInterval, DaySpan};
use serde::{Deserialize, Serialize};

/// Normalized vessel name used for grouping and keying. Two records refer
/// to the same vessel iff their `VesselKey`s are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselKey(String);

impl VesselKey {
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self(normalized)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VesselKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one canonical sailing occurrence: a vessel on a sail day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    vessel: VesselKey,
    sail_day: Day,
}

impl SlotKey {
    #[inline]
    pub fn new(vessel: VesselKey, sail_day: Day) -> Self {
        Self { vessel, sail_day }
    }

    #[inline]
    pub fn vessel(&self) -> &VesselKey {
        &self.vessel
    }

    #[inline]
    pub fn sail_day(&self) -> Day {
        self.sail_day
    }
}

impl std::fmt::Display for SlotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.vessel, self.sail_day)
    }
}

/// One canonical sailing occurrence carrying every offer variant that
/// applies to it. Construction guarantees at least one offer and a
/// return day no earlier than the sail day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    key: SlotKey,
    vessel_display: String,
    return_day: Day,
    nights: DaySpan,
    depart_port: String,
    offers: Vec<Offer>,
    committed: bool,
}

impl Slot {
    pub fn new(
        key: SlotKey,
        vessel_display: String,
        return_day: Day,
        nights: DaySpan,
        depart_port: String,
        offers: Vec<Offer>,
        committed: bool,
    ) -> Result<Self, EmptyOfferListError> {
        if offers.is_empty() {
            return Err(EmptyOfferListError::new(key));
        }
        let return_day = return_day.max(key.sail_day());
        Ok(Self {
            key,
            vessel_display,
            return_day,
            nights,
            depart_port,
            offers,
            committed,
        })
    }

    #[inline]
    pub fn key(&self) -> &SlotKey {
        &self.key
    }

    #[inline]
    pub fn vessel(&self) -> &VesselKey {
        self.key.vessel()
    }

    #[inline]
    pub fn vessel_display(&self) -> &str {
        &self.vessel_display
    }

    #[inline]
    pub fn sail_day(&self) -> Day {
        self.key.sail_day()
    }

    #[inline]
    pub fn return_day(&self) -> Day {
        self.return_day
    }

    #[inline]
    pub fn nights(&self) -> DaySpan {
        self.nights
    }

    #[inline]
    pub fn depart_port(&self) -> &str {
        &self.depart_port
    }

    #[inline]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    #[inline]
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Calendar days this sailing occupies, embark through debark.
    #[inline]
    pub fn span(&self) -> DayInterval {
        DayInterval::new(self.sail_day(), self.return_day)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} nights, {} offers)",
            self.key,
            self.nights.value(),
            self.offers.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> Day {
        Day::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn offer(code: &str) -> Offer {
        Offer::new(code.to_string(), String::new(), String::new(), 2, None, None)
    }

    fn key(vessel: &str, y: i32, m: u32, d: u32) -> SlotKey {
        SlotKey::new(VesselKey::new(vessel), day(y, m, d))
    }

    #[test]
    fn test_vessel_key_normalizes_case_and_whitespace() {
        assert_eq!(VesselKey::new("  Oasis  of the  Seas "), VesselKey::new("oasis of the seas"));
        assert_ne!(VesselKey::new("Oasis"), VesselKey::new("Allure"));
    }

    #[test]
    fn test_slot_rejects_empty_offer_list() {
        let err = Slot::new(
            key("Oasis", 2025, 1, 1),
            "Oasis".to_string(),
            day(2025, 1, 8),
            DaySpan::new(7),
            "Miami".to_string(),
            Vec::new(),
            false,
        )
        .expect_err("empty offer list must be rejected");
        assert_eq!(err.key(), &key("Oasis", 2025, 1, 1));
    }

    #[test]
    fn test_slot_clamps_return_day_to_sail_day() {
        let s = Slot::new(
            key("Oasis", 2025, 1, 10),
            "Oasis".to_string(),
            day(2025, 1, 3), // bad data: returns before it sails
            DaySpan::new(7),
            "Miami".to_string(),
            vec![offer("A")],
            false,
        )
        .unwrap();
        assert_eq!(s.return_day(), s.sail_day());
        assert!(s.return_day() >= s.sail_day());
    }

    #[test]
    fn test_slot_span_covers_sail_through_return() {
        let s = Slot::new(
            key("Oasis", 2025, 1, 1),
            "Oasis".to_string(),
            day(2025, 1, 8),
            DaySpan::new(7),
            "Miami".to_string(),
            vec![offer("A")],
            false,
        )
        .unwrap();
        assert!(s.span().contains(day(2025, 1, 1)));
        assert!(s.span().contains(day(2025, 1, 8)));
        assert!(!s.span().contains(day(2025, 1, 9)));
    }

    #[test]
    fn test_slot_key_ordering_groups_by_vessel_then_day() {
        let a = key("Allure", 2025, 6, 1);
        let b = key("Oasis", 2025, 1, 1);
        let c = key("Oasis", 2025, 1, 9);
        let mut keys = vec![c.clone(), a.clone(), b.clone()];
        keys.sort();
        assert_eq!(keys, vec![a, b, c]);
    }
}
