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

use crate::filters::ValidatedChain;
use sail_chain_core::prelude::{Day, DayInterval, DaySpan};
use sail_chain_model::prelude::{Offer, SlotCatalog, SlotKey};
use serde::Serialize;

/// One leg of a finalized back-to-back trip, with the offers that remain
/// bookable on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    key: SlotKey,
    vessel_display: String,
    sail_day: Day,
    return_day: Day,
    nights: DaySpan,
    depart_port: String,
    offers: Vec<Offer>,
}

impl Leg {
    #[inline]
    pub fn key(&self) -> &SlotKey {
        &self.key
    }

    #[inline]
    pub fn vessel_display(&self) -> &str {
        &self.vessel_display
    }

    #[inline]
    pub fn sail_day(&self) -> Day {
        self.sail_day
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
}

/// A finalized, accepted multi-leg trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackToBackSet {
    vessel_display: String,
    legs: Vec<Leg>,
    gaps: Vec<DaySpan>,
    total_nights: DaySpan,
    offer_codes: Vec<String>,
    offer_names: Vec<String>,
    depart_port: String,
    start_day: Day,
    end_day: Day,
}

impl BackToBackSet {
    #[inline]
    pub fn vessel_display(&self) -> &str {
        &self.vessel_display
    }

    #[inline]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    #[inline]
    pub fn gaps(&self) -> &[DaySpan] {
        &self.gaps
    }

    #[inline]
    pub fn total_nights(&self) -> DaySpan {
        self.total_nights
    }

    /// Offer codes seen anywhere in the set, sorted and deduplicated.
    #[inline]
    pub fn offer_codes(&self) -> &[String] {
        &self.offer_codes
    }

    #[inline]
    pub fn offer_names(&self) -> &[String] {
        &self.offer_names
    }

    /// Departure port of the first leg.
    #[inline]
    pub fn depart_port(&self) -> &str {
        &self.depart_port
    }

    #[inline]
    pub fn start_day(&self) -> Day {
        self.start_day
    }

    #[inline]
    pub fn end_day(&self) -> Day {
        self.end_day
    }

    #[inline]
    pub fn span(&self) -> DayInterval {
        DayInterval::new(self.start_day, self.end_day)
    }
}

/// Converts an accepted chain into its output record. Returns `None`
/// only if a slot key fails to resolve, which the pipeline never
/// produces.
pub fn assemble(validated: ValidatedChain, catalog: &SlotCatalog) -> Option<BackToBackSet> {
    let (chain, offers_per_leg) = validated.into_parts();
    let mut legs = Vec::with_capacity(chain.len());
    for (key, offers) in chain.slots().iter().zip(offers_per_leg) {
        let slot = catalog.get(key)?;
        legs.push(Leg {
            key: key.clone(),
            vessel_display: slot.vessel_display().to_string(),
            sail_day: slot.sail_day(),
            return_day: slot.return_day(),
            nights: slot.nights(),
            depart_port: slot.depart_port().to_string(),
            offers,
        });
    }

    let mut offer_codes: Vec<String> = legs
        .iter()
        .flat_map(|l| l.offers.iter())
        .filter(|o| o.has_code())
        .map(|o| o.code().to_string())
        .collect();
    offer_codes.sort();
    offer_codes.dedup();

    let mut offer_names: Vec<String> = legs
        .iter()
        .flat_map(|l| l.offers.iter())
        .map(|o| o.name().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    offer_names.sort();
    offer_names.dedup();

    let first = legs.first()?;
    let last = legs.last()?;
    Some(BackToBackSet {
        vessel_display: first.vessel_display.clone(),
        depart_port: first.depart_port.clone(),
        start_day: first.sail_day,
        end_day: last.return_day,
        total_nights: legs.iter().map(|l| l.nights).sum(),
        gaps: chain.gaps().to_vec(),
        offer_codes,
        offer_names,
        legs,
    })
}

/// Per-cruise display annotation: where a sailing sits inside its set
/// and which sibling sailings accompany it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSailing {
    key: SlotKey,
    set_index: usize,
    position: usize,
    total_legs: usize,
    siblings: Vec<SlotKey>,
}

impl AnnotatedSailing {
    #[inline]
    pub fn key(&self) -> &SlotKey {
        &self.key
    }

    #[inline]
    pub fn set_index(&self) -> usize {
        self.set_index
    }

    /// 1-based position of this sailing within its set.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn total_legs(&self) -> usize {
        self.total_legs
    }

    #[inline]
    pub fn siblings(&self) -> &[SlotKey] {
        &self.siblings
    }
}

/// Expands accepted sets back into per-cruise annotations for a
/// presentation layer.
pub fn expand_to_display(sets: &[BackToBackSet]) -> Vec<AnnotatedSailing> {
    let mut annotations = Vec::new();
    for (set_index, set) in sets.iter().enumerate() {
        let total_legs = set.legs().len();
        for (i, leg) in set.legs().iter().enumerate() {
            let siblings = set
                .legs()
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| other.key().clone())
                .collect();
            annotations.push(AnnotatedSailing {
                key: leg.key().clone(),
                set_index,
                position: i + 1,
                total_legs,
                siblings,
            });
        }
    }
    annotations
}

/// One-line human-readable rendering of a set.
pub fn summarize(set: &BackToBackSet) -> String {
    format!(
        "{}: {} legs, {} nights, {} -> {}, from {}",
        set.vessel_display(),
        set.legs().len(),
        set.total_nights().value(),
        set.start_day(),
        set.end_day(),
        if set.depart_port().is_empty() {
            "unknown port"
        } else {
            set.depart_port()
        },
    )
}
