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

use crate::{
    offer::Offer,
    record::{parse_flexible_date, BookingStatus, SailingRecord},
    slot::{Slot, SlotKey, VesselKey},
};
use sail_chain_core::prelude::{Day, DaySpan};
use std::collections::BTreeMap;

/// Which input list a dropped record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSource {
    Candidate,
    Committed,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Candidate => write!(f, "candidate"),
            RecordSource::Committed => write!(f, "committed"),
        }
    }
}

/// Why aggregation discarded a record. Fail-soft: these are reported,
/// never thrown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropReason {
    MissingVessel,
    MissingSailDate,
    UnparseableSailDate(String),
    PromotionalExclusion(String),
    OfferMidBooking(String),
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::MissingVessel => write!(f, "record has no vessel name"),
            DropReason::MissingSailDate => write!(f, "record has no sail date"),
            DropReason::UnparseableSailDate(raw) => {
                write!(f, "sail date {:?} could not be parsed", raw)
            }
            DropReason::PromotionalExclusion(code) => {
                write!(f, "offer {:?} matches a promotional exclusion", code)
            }
            DropReason::OfferMidBooking(code) => {
                write!(f, "offer {:?} is already mid-booking", code)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordDrop {
    source: RecordSource,
    index: usize,
    reason: DropReason,
}

impl RecordDrop {
    #[inline]
    pub fn new(source: RecordSource, index: usize, reason: DropReason) -> Self {
        Self {
            source,
            index,
            reason,
        }
    }

    #[inline]
    pub fn source(&self) -> RecordSource {
        self.source
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn reason(&self) -> &DropReason {
        &self.reason
    }
}

impl std::fmt::Display for RecordDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} record #{}: {}", self.source, self.index, self.reason)
    }
}

#[derive(Debug, Default)]
struct SlotDraft {
    vessel_display: String,
    depart_port: String,
    nights: u32,
    provided_return: Option<Day>,
    offers: BTreeMap<(String, String, u32), Offer>,
    committed: bool,
}

/// Collapses raw sailing records into canonical slots keyed by
/// (normalized vessel, sail day).
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    excluded_offer_patterns: Vec<String>,
    offer_lifecycles: BTreeMap<String, BookingStatus>,
}

impl CatalogBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
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

    fn lifecycle_for(&self, code: &str) -> Option<BookingStatus> {
        self.offer_lifecycles
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(code))
            .map(|(_, status)| *status)
    }

    /// Builds the catalog from available candidates and already-committed
    /// records. Unusable records are dropped and reported; nothing fails.
    pub fn build(
        &self,
        candidates: &[SailingRecord],
        booked: &[SailingRecord],
    ) -> (SlotCatalog, Vec<RecordDrop>) {
        let mut drafts: BTreeMap<SlotKey, SlotDraft> = BTreeMap::new();
        let mut drops = Vec::new();

        let sources = candidates
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordSource::Candidate, i, r))
            .chain(
                booked
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (RecordSource::Committed, i, r)),
            );

        for (source, index, record) in sources {
            match self.accept(record, source) {
                Ok((key, offer)) => {
                    let draft = drafts.entry(key.clone()).or_default();
                    if draft.vessel_display.is_empty() {
                        if let Some(vessel) = record.vessel_trimmed() {
                            draft.vessel_display = vessel.to_string();
                        }
                    }
                    if draft.depart_port.is_empty() {
                        if let Some(port) = record.depart_port.as_deref() {
                            draft.depart_port = port.trim().to_string();
                        }
                    }
                    if draft.nights == 0 {
                        draft.nights = record.nights.unwrap_or(0);
                    }
                    if draft.provided_return.is_none() {
                        draft.provided_return = record
                            .return_date
                            .as_deref()
                            .and_then(parse_flexible_date)
                            .map(Day::from_date);
                    }
                    draft.offers.entry(offer.dedup_key()).or_insert(offer);
                    draft.committed |= source == RecordSource::Committed;
                }
                Err(reason) => {
                    tracing::debug!(%source, index, %reason, "dropping record");
                    drops.push(RecordDrop::new(source, index, reason));
                }
            }
        }

        let mut catalog = SlotCatalog::default();
        for (key, draft) in drafts {
            let sail_day = key.sail_day();
            let return_day = draft
                .provided_return
                .unwrap_or_else(|| sail_day.saturating_add(DaySpan::new(draft.nights as i32)));
            let Ok(slot) = Slot::new(
                key,
                draft.vessel_display,
                return_day,
                DaySpan::new(draft.nights as i32),
                draft.depart_port,
                draft.offers.into_values().collect(),
                draft.committed,
            ) else {
                continue;
            };
            catalog.insert(slot);
        }

        (catalog, drops)
    }

    fn accept(
        &self,
        record: &SailingRecord,
        source: RecordSource,
    ) -> Result<(SlotKey, Offer), DropReason> {
        let Some(vessel) = record.vessel_trimmed() else {
            return Err(DropReason::MissingVessel);
        };
        let Some(raw_date) = record.sail_date.as_deref().map(str::trim).filter(|s| !s.is_empty())
        else {
            return Err(DropReason::MissingSailDate);
        };
        let Some(sail_date) = parse_flexible_date(raw_date) else {
            return Err(DropReason::UnparseableSailDate(raw_date.to_string()));
        };

        let offer = Offer::from_record(record);
        if offer.matches_any_pattern(&self.excluded_offer_patterns) {
            return Err(DropReason::PromotionalExclusion(offer.code().to_string()));
        }
        if source == RecordSource::Candidate {
            let mid_booking = record.status.is_some_and(|s| s.is_mid_booking())
                || (offer.has_code()
                    && self
                        .lifecycle_for(offer.code())
                        .is_some_and(|s| s.is_mid_booking()));
            if mid_booking {
                return Err(DropReason::OfferMidBooking(offer.code().to_string()));
            }
        }

        let key = SlotKey::new(VesselKey::new(vessel), Day::from_date(sail_date));
        Ok((key, offer))
    }
}

/// Ordered collection of slots, keyed by (vessel, sail day).
#[derive(Debug, Clone, Default)]
pub struct SlotCatalog {
    slots: BTreeMap<SlotKey, Slot>,
}

impl SlotCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, slot: Slot) -> Option<Slot> {
        self.slots.insert(slot.key().clone(), slot)
    }

    #[inline]
    pub fn get(&self, key: &SlotKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
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
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// Slots partitioned into per-vessel groups, each sorted ascending by
    /// sail day. Key order makes the partitioning deterministic.
    pub fn vessel_groups(&self) -> Vec<Vec<&Slot>> {
        let mut groups: Vec<Vec<&Slot>> = Vec::new();
        for slot in self.slots.values() {
            match groups.last_mut() {
                Some(group) if group[0].vessel() == slot.vessel() => group.push(slot),
                _ => groups.push(vec![slot]),
            }
        }
        groups
    }
}

impl FromIterator<Slot> for SlotCatalog {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for slot in iter {
            catalog.insert(slot);
        }
        catalog
    }
}
