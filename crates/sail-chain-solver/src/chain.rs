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

use sail_chain_core::prelude::{Day, DayInterval, DaySpan};
use sail_chain_model::prelude::{Slot, SlotCatalog, SlotKey};
use std::collections::BTreeSet;

/// An ordered, cycle-free sequence of slots on one vessel, connected by
/// valid idle-day gaps. `gaps[i]` is the idle time between leg `i` and
/// leg `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    slots: Vec<SlotKey>,
    gaps: Vec<DaySpan>,
}

impl Chain {
    /// Builds a chain from its legs and inter-leg gaps.
    ///
    /// Invariants (guaranteed by the enumerator, asserted here): at least
    /// one leg, one gap fewer than legs, no repeated leg.
    pub fn from_parts(slots: Vec<SlotKey>, gaps: Vec<DaySpan>) -> Self {
        debug_assert!(!slots.is_empty());
        debug_assert_eq!(gaps.len() + 1, slots.len());
        debug_assert!(
            slots.iter().collect::<BTreeSet<_>>().len() == slots.len(),
            "a chain never repeats a slot"
        );
        Self { slots, gaps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn slots(&self) -> &[SlotKey] {
        &self.slots
    }

    #[inline]
    pub fn gaps(&self) -> &[DaySpan] {
        &self.gaps
    }

    #[inline]
    pub fn first(&self) -> &SlotKey {
        &self.slots[0]
    }

    #[inline]
    pub fn last(&self) -> &SlotKey {
        &self.slots[self.slots.len() - 1]
    }

    #[inline]
    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains(key)
    }

    /// True when `self`'s leg sequence appears as a contiguous run inside
    /// `other`'s. Compared token-by-token over slot keys; substring
    /// matching over rendered text would admit false positives.
    pub fn is_sub_chain_of(&self, other: &Chain) -> bool {
        if self.len() > other.len() {
            return false;
        }
        other
            .slots
            .windows(self.len())
            .any(|window| window == self.slots.as_slice())
    }

    /// Sum of nights across all legs present in the catalog.
    pub fn total_nights(&self, catalog: &SlotCatalog) -> DaySpan {
        self.resolve(catalog).map(|s| s.nights()).sum()
    }

    /// Calendar interval from the first leg's sail day through the last
    /// leg's return day. `None` when a key is missing from the catalog.
    pub fn span(&self, catalog: &SlotCatalog) -> Option<DayInterval> {
        let first = catalog.get(self.first())?;
        let last = catalog.get(self.last())?;
        Some(DayInterval::new(first.sail_day(), last.return_day()))
    }

    /// First booked calendar day any non-committed leg touches, if any.
    /// Committed legs are exempt: the user already sails them.
    pub fn booked_date_conflict(
        &self,
        catalog: &SlotCatalog,
        booked_dates: &BTreeSet<Day>,
    ) -> Option<Day> {
        if booked_dates.is_empty() {
            return None;
        }
        self.resolve(catalog)
            .filter(|slot| !slot.is_committed())
            .flat_map(|slot| {
                booked_dates
                    .iter()
                    .copied()
                    .filter(move |day| slot.span().contains(*day))
            })
            .min()
    }

    #[inline]
    pub fn resolve<'a>(&'a self, catalog: &'a SlotCatalog) -> impl Iterator<Item = &'a Slot> + 'a {
        self.slots.iter().filter_map(|key| catalog.get(key))
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for key in &self.slots {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{}", key)?;
            first = false;
        }
        Ok(())
    }
}
