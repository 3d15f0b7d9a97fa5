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

use sail_chain_model::prelude::{BookingStatus, PortAliasTable};
use std::collections::BTreeMap;

/// Cap on the number of DFS node visits. The enumeration is worst-case
/// exponential; the budget turns pathological inputs into partial results
/// with a diagnostic instead of an unbounded search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchBudget {
    max_visits: Option<u64>,
}

impl SearchBudget {
    pub const DEFAULT_MAX_VISITS: u64 = 250_000;

    #[inline]
    pub const fn new(max_visits: u64) -> Self {
        Self {
            max_visits: Some(max_visits),
        }
    }

    #[inline]
    pub const fn unbounded() -> Self {
        Self { max_visits: None }
    }

    #[inline]
    pub const fn max_visits(&self) -> Option<u64> {
        self.max_visits
    }

    #[inline]
    pub fn is_exhausted(&self, visited: u64) -> bool {
        self.max_visits.is_some_and(|max| visited >= max)
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_VISITS)
    }
}

/// Knobs of the back-to-back search. Defaults mirror how the feature is
/// used in production: short idle windows, trips capped at two weeks.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_gap_days: u32,
    pub require_different_offers: bool,
    pub min_chain_length: usize,
    pub min_days_between_batches: u32,
    pub nights_cap: u32,
    pub exclude_booked_date_conflicts: bool,
    pub budget: SearchBudget,
    pub alias_table: PortAliasTable,
    pub excluded_offer_patterns: Vec<String>,
    pub offer_lifecycles: BTreeMap<String, BookingStatus>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_gap_days: 2,
            require_different_offers: false,
            min_chain_length: 2,
            min_days_between_batches: 3,
            nights_cap: 14,
            exclude_booked_date_conflicts: false,
            budget: SearchBudget::default(),
            alias_table: PortAliasTable::default(),
            excluded_offer_patterns: Vec::new(),
            offer_lifecycles: BTreeMap::new(),
        }
    }
}

impl SearchOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_max_gap_days(mut self, days: u32) -> Self {
        self.max_gap_days = days;
        self
    }

    #[inline]
    pub fn with_require_different_offers(mut self, required: bool) -> Self {
        self.require_different_offers = required;
        self
    }

    #[inline]
    pub fn with_min_chain_length(mut self, len: usize) -> Self {
        self.min_chain_length = len.max(1);
        self
    }

    #[inline]
    pub fn with_min_days_between_batches(mut self, days: u32) -> Self {
        self.min_days_between_batches = days;
        self
    }

    #[inline]
    pub fn with_nights_cap(mut self, cap: u32) -> Self {
        self.nights_cap = cap;
        self
    }

    #[inline]
    pub fn with_exclude_booked_date_conflicts(mut self, enabled: bool) -> Self {
        self.exclude_booked_date_conflicts = enabled;
        self
    }

    #[inline]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    #[inline]
    pub fn with_alias_table(mut self, table: PortAliasTable) -> Self {
        self.alias_table = table;
        self
    }

    #[inline]
    pub fn with_excluded_offer_patterns<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.excluded_offer_patterns = patterns.into_iter().collect();
        self
    }

    #[inline]
    pub fn with_offer_lifecycles(mut self, lifecycles: BTreeMap<String, BookingStatus>) -> Self {
        self.offer_lifecycles = lifecycles;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let o = SearchOptions::default();
        assert_eq!(o.max_gap_days, 2);
        assert!(!o.require_different_offers);
        assert_eq!(o.min_chain_length, 2);
        assert_eq!(o.min_days_between_batches, 3);
        assert_eq!(o.nights_cap, 14);
        assert!(!o.exclude_booked_date_conflicts);
        assert_eq!(
            o.budget.max_visits(),
            Some(SearchBudget::DEFAULT_MAX_VISITS)
        );
    }

    #[test]
    fn test_budget_exhaustion() {
        let b = SearchBudget::new(10);
        assert!(!b.is_exhausted(9));
        assert!(b.is_exhausted(10));
        assert!(b.is_exhausted(11));
        assert!(!SearchBudget::unbounded().is_exhausted(u64::MAX));
    }

    #[test]
    fn test_min_chain_length_floor_is_one() {
        let o = SearchOptions::new().with_min_chain_length(0);
        assert_eq!(o.min_chain_length, 1);
    }
}
