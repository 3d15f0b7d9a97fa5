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
use sail_chain_core::prelude::{DayInterval, DaySpan};
use sail_chain_model::prelude::SlotCatalog;

/// Greedily picks a non-overlapping, adequately spaced subset of chains.
///
/// Candidates are ordered by (total nights, start day) so shorter,
/// sooner trips win ties. This is an interval-scheduling heuristic, not
/// an optimizer over total accepted nights or trip count.
pub fn select_spaced(
    chains: Vec<ValidatedChain>,
    catalog: &SlotCatalog,
    min_days_between: u32,
) -> Vec<ValidatedChain> {
    let mut ordered: Vec<(DayInterval, DaySpan, ValidatedChain)> = chains
        .into_iter()
        .filter_map(|vc| {
            let span = vc.chain().span(catalog)?;
            let nights = vc.chain().total_nights(catalog);
            Some((span, nights, vc))
        })
        .collect();
    ordered.sort_by(|(a_span, a_nights, a), (b_span, b_nights, b)| {
        a_nights
            .cmp(b_nights)
            .then(a_span.start().cmp(&b_span.start()))
            .then(a_span.end().cmp(&b_span.end()))
            .then(a.chain().slots().cmp(b.chain().slots()))
    });

    let min_gap = DaySpan::new(min_days_between as i32);
    let mut accepted_spans: Vec<DayInterval> = Vec::new();
    let mut accepted: Vec<ValidatedChain> = Vec::new();

    for (span, _, vc) in ordered {
        let fits = accepted_spans.iter().all(|other| {
            if span.overlaps(other) {
                return false;
            }
            let gap = if span.end() < other.start() {
                span.gap_to(other)
            } else {
                other.gap_to(&span)
            };
            gap >= min_gap
        });
        if fits {
            tracing::trace!(%span, "accepting chain");
            accepted_spans.push(span);
            accepted.push(vc);
        }
    }

    // Present the accepted trips in calendar order.
    let mut keyed: Vec<(DayInterval, ValidatedChain)> = accepted_spans
        .into_iter()
        .zip(accepted)
        .collect();
    keyed.sort_by_key(|(span, _)| *span);
    keyed.into_iter().map(|(_, vc)| vc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chain::Chain, filters::ChainFilter, options::SearchOptions};
    use chrono::NaiveDate;
    use sail_chain_core::prelude::Day;
    use sail_chain_model::prelude::{Offer, Slot, SlotKey, VesselKey};
    use std::collections::BTreeSet;

    fn day(d: u32) -> Day {
        Day::from_date(NaiveDate::from_ymd_opt(2025, 3, d).unwrap())
    }

    fn k(vessel: &str, d: u32) -> SlotKey {
        SlotKey::new(VesselKey::new(vessel), day(d))
    }

    fn slot(vessel: &str, sail: u32, nights: i32) -> Slot {
        Slot::new(
            k(vessel, sail),
            vessel.to_string(),
            day(sail) + DaySpan::new(nights),
            DaySpan::new(nights),
            "Miami".to_string(),
            vec![Offer::new(
                format!("{vessel}{sail}"),
                String::new(),
                String::new(),
                2,
                None,
                None,
            )],
            false,
        )
        .unwrap()
    }

    fn validated(catalog: &SlotCatalog, keys: &[SlotKey]) -> ValidatedChain {
        let chain = Chain::from_parts(keys.to_vec(), vec![DaySpan::new(1); keys.len() - 1]);
        let options = SearchOptions::default().with_nights_cap(100);
        let booked = BTreeSet::new();
        ChainFilter::new(catalog, &options, &booked)
            .validate(chain)
            .unwrap()
    }

    #[test]
    fn test_overlapping_chains_keep_the_shorter_sooner_one() {
        let catalog: SlotCatalog = [
            slot("Oasis", 1, 7),
            slot("Oasis", 9, 7),
            slot("Allure", 9, 7),
            slot("Allure", 17, 7),
        ]
        .into_iter()
        .collect();
        let a = validated(&catalog, &[k("Oasis", 1), k("Oasis", 9)]);
        let b = validated(&catalog, &[k("Allure", 9), k("Allure", 17)]);
        let out = select_spaced(vec![b, a], &catalog, 3);
        assert_eq!(out.len(), 1);
        // Equal nights; earlier start wins
        assert_eq!(out[0].chain().first(), &k("Oasis", 1));
    }

    #[test]
    fn test_too_close_chains_are_rejected() {
        let catalog: SlotCatalog = [
            slot("Oasis", 1, 3),
            slot("Oasis", 5, 3),
            slot("Allure", 10, 3),
            slot("Allure", 14, 3),
        ]
        .into_iter()
        .collect();
        // First trip spans 1..8, second spans 10..17: 2 days apart
        let a = validated(&catalog, &[k("Oasis", 1), k("Oasis", 5)]);
        let b = validated(&catalog, &[k("Allure", 10), k("Allure", 14)]);
        let out = select_spaced(vec![a, b], &catalog, 3);
        assert_eq!(out.len(), 1);

        let both = select_spaced(
            vec![
                validated(&catalog, &[k("Oasis", 1), k("Oasis", 5)]),
                validated(&catalog, &[k("Allure", 10), k("Allure", 14)]),
            ],
            &catalog,
            2,
        );
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_accepted_chains_come_back_in_calendar_order() {
        let catalog: SlotCatalog = [
            slot("Oasis", 20, 3),
            slot("Oasis", 24, 3),
            slot("Allure", 1, 2),
            slot("Allure", 4, 2),
        ]
        .into_iter()
        .collect();
        // The later trip has fewer nights and is considered first, but
        // output is calendar-ordered.
        let late = validated(&catalog, &[k("Oasis", 20), k("Oasis", 24)]);
        let early = validated(&catalog, &[k("Allure", 1), k("Allure", 4)]);
        let out = select_spaced(vec![late, early], &catalog, 3);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].chain().first(), &k("Allure", 1));
        assert_eq!(out[1].chain().first(), &k("Oasis", 20));
    }
}
