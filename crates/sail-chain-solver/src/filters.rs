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

use crate::{chain::Chain, diag::ChainDropReason, options::SearchOptions};
use sail_chain_core::prelude::Day;
use sail_chain_model::prelude::{Offer, SlotCatalog};
use std::collections::BTreeSet;

/// A chain that survived offer and nights filtering, together with the
/// offers that remain bookable on each leg.
#[derive(Debug, Clone)]
pub struct ValidatedChain {
    chain: Chain,
    offers_per_leg: Vec<Vec<Offer>>,
}

impl ValidatedChain {
    #[inline]
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    #[inline]
    pub fn offers_per_leg(&self) -> &[Vec<Offer>] {
        &self.offers_per_leg
    }

    #[inline]
    pub fn into_parts(self) -> (Chain, Vec<Vec<Offer>>) {
        (self.chain, self.offers_per_leg)
    }
}

/// Re-validates each surviving chain: per-leg offer eligibility,
/// chain-local offer-code uniqueness, the total-nights cap, and
/// (optionally) conflicts with externally booked calendar dates.
pub struct ChainFilter<'a> {
    catalog: &'a SlotCatalog,
    options: &'a SearchOptions,
    booked_dates: &'a BTreeSet<Day>,
}

impl<'a> ChainFilter<'a> {
    pub fn new(
        catalog: &'a SlotCatalog,
        options: &'a SearchOptions,
        booked_dates: &'a BTreeSet<Day>,
    ) -> Self {
        Self {
            catalog,
            options,
            booked_dates,
        }
    }

    /// Validates one chain. Offer-code consumption is tracked locally to
    /// this chain, independent of any other chain.
    pub fn validate(&self, chain: Chain) -> Result<ValidatedChain, ChainDropReason> {
        let mut consumed: BTreeSet<String> = BTreeSet::new();
        let mut offers_per_leg = Vec::with_capacity(chain.len());

        for key in chain.slots() {
            let Some(slot) = self.catalog.get(key) else {
                return Err(ChainDropReason::NoValidOffers { slot: key.clone() });
            };
            let valid: Vec<Offer> = slot
                .offers()
                .iter()
                .filter(|o| !o.matches_any_pattern(&self.options.excluded_offer_patterns))
                .filter(|o| {
                    !self.options.require_different_offers
                        || !o.has_code()
                        || !consumed.contains(&o.code().to_ascii_lowercase())
                })
                .cloned()
                .collect();
            if valid.is_empty() {
                return Err(ChainDropReason::NoValidOffers { slot: key.clone() });
            }
            if self.options.require_different_offers {
                if let Some(code) = valid.iter().find(|o| o.has_code()) {
                    consumed.insert(code.code().to_ascii_lowercase());
                }
            }
            offers_per_leg.push(valid);
        }

        let total_nights = chain.total_nights(self.catalog).value();
        if total_nights > self.options.nights_cap as i32 {
            return Err(ChainDropReason::OverNightsCap {
                total_nights,
                cap: self.options.nights_cap,
            });
        }

        if self.options.exclude_booked_date_conflicts {
            if let Some(day) = chain.booked_date_conflict(self.catalog, self.booked_dates) {
                return Err(ChainDropReason::BookedDateConflict { day });
            }
        }

        Ok(ValidatedChain {
            chain,
            offers_per_leg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sail_chain_core::prelude::DaySpan;
    use sail_chain_model::prelude::{Slot, SlotKey, VesselKey};

    fn day(d: u32) -> Day {
        Day::from_date(NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
    }

    fn k(d: u32) -> SlotKey {
        SlotKey::new(VesselKey::new("Oasis"), day(d))
    }

    fn offer(code: &str) -> Offer {
        Offer::new(code.to_string(), String::new(), String::new(), 2, None, None)
    }

    fn slot(sail: u32, nights: i32, offers: Vec<Offer>) -> Slot {
        Slot::new(
            k(sail),
            "Oasis".to_string(),
            day(sail) + DaySpan::new(nights),
            DaySpan::new(nights),
            "Miami".to_string(),
            offers,
            false,
        )
        .unwrap()
    }

    fn two_leg_chain() -> Chain {
        Chain::from_parts(vec![k(1), k(9)], vec![DaySpan::new(1)])
    }

    #[test]
    fn test_valid_chain_passes_with_offers_per_leg() {
        let catalog: SlotCatalog = [
            slot(1, 7, vec![offer("AAA")]),
            slot(9, 7, vec![offer("BBB"), offer("CCC")]),
        ]
        .into_iter()
        .collect();
        let options = SearchOptions::default();
        let booked = BTreeSet::new();
        let filter = ChainFilter::new(&catalog, &options, &booked);
        let v = filter.validate(two_leg_chain()).unwrap();
        assert_eq!(v.offers_per_leg()[0].len(), 1);
        assert_eq!(v.offers_per_leg()[1].len(), 2);
    }

    #[test]
    fn test_promotional_exclusion_can_invalidate_whole_chain() {
        let catalog: SlotCatalog = [
            slot(1, 7, vec![offer("AAA")]),
            slot(9, 7, vec![offer("FREEPLAY1")]),
        ]
        .into_iter()
        .collect();
        let options =
            SearchOptions::default().with_excluded_offer_patterns(["FREEPLAY".to_string()]);
        let booked = BTreeSet::new();
        let filter = ChainFilter::new(&catalog, &options, &booked);
        let err = filter.validate(two_leg_chain()).unwrap_err();
        assert_eq!(err, ChainDropReason::NoValidOffers { slot: k(9) });
    }

    #[test]
    fn test_chain_local_code_consumption() {
        let catalog: SlotCatalog = [
            slot(1, 7, vec![offer("SAME")]),
            slot(9, 7, vec![offer("SAME")]),
        ]
        .into_iter()
        .collect();
        let options = SearchOptions::default().with_require_different_offers(true);
        let booked = BTreeSet::new();
        let filter = ChainFilter::new(&catalog, &options, &booked);
        let err = filter.validate(two_leg_chain()).unwrap_err();
        assert_eq!(err, ChainDropReason::NoValidOffers { slot: k(9) });

        // Without uniqueness the same chain is fine
        let relaxed = SearchOptions::default();
        let filter = ChainFilter::new(&catalog, &relaxed, &booked);
        assert!(filter.validate(two_leg_chain()).is_ok());
    }

    #[test]
    fn test_nights_cap_drops_long_chains() {
        let catalog: SlotCatalog = [
            slot(1, 9, vec![offer("AAA")]),
            slot(11, 7, vec![offer("BBB")]),
        ]
        .into_iter()
        .collect();
        let chain = Chain::from_parts(vec![k(1), k(11)], vec![DaySpan::new(1)]);
        let options = SearchOptions::default(); // cap 14, chain has 16
        let booked = BTreeSet::new();
        let filter = ChainFilter::new(&catalog, &options, &booked);
        let err = filter.validate(chain.clone()).unwrap_err();
        assert_eq!(
            err,
            ChainDropReason::OverNightsCap {
                total_nights: 16,
                cap: 14
            }
        );

        // A raised cap admits it
        let generous = SearchOptions::default().with_nights_cap(21);
        let filter = ChainFilter::new(&catalog, &generous, &booked);
        assert!(filter.validate(chain).is_ok());
    }

    #[test]
    fn test_booked_date_conflicts_only_when_enabled() {
        let catalog: SlotCatalog = [
            slot(1, 7, vec![offer("AAA")]),
            slot(9, 7, vec![offer("BBB")]),
        ]
        .into_iter()
        .collect();
        let booked: BTreeSet<Day> = [day(3)].into();

        let off = SearchOptions::default();
        let filter = ChainFilter::new(&catalog, &off, &booked);
        assert!(filter.validate(two_leg_chain()).is_ok());

        let on = SearchOptions::default().with_exclude_booked_date_conflicts(true);
        let filter = ChainFilter::new(&catalog, &on, &booked);
        let err = filter.validate(two_leg_chain()).unwrap_err();
        assert_eq!(err, ChainDropReason::BookedDateConflict { day: day(3) });
    }
}
