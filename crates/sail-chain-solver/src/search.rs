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
    adjacency::AdjacencyMap,
    assemble::{assemble, BackToBackSet},
    dedup::dedup_chains,
    diag::Diagnostic,
    enumerate::ChainEnumerator,
    filters::ChainFilter,
    options::SearchOptions,
    select::select_spaced,
};
use sail_chain_core::prelude::Day;
use sail_chain_model::prelude::{CatalogBuilder, SailingRecord};
use std::{collections::BTreeSet, sync::atomic::AtomicBool};

/// Result of one search run: the accepted sets, every anomaly observed
/// along the way, and whether enumeration was cut short.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    sets: Vec<BackToBackSet>,
    diagnostics: Vec<Diagnostic>,
    truncated: bool,
}

impl SearchOutcome {
    #[inline]
    pub fn sets(&self) -> &[BackToBackSet] {
        &self.sets
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[inline]
    pub fn into_sets(self) -> Vec<BackToBackSet> {
        self.sets
    }
}

/// The full back-to-back pipeline: aggregate, connect, enumerate,
/// dedup, filter, select, assemble.
///
/// Pure over its inputs: no I/O, no shared state, identical inputs and
/// options always produce identical output, order included. Safe to run
/// from multiple threads at once.
#[derive(Debug, Clone, Default)]
pub struct BackToBackSearch {
    options: SearchOptions,
}

impl BackToBackSearch {
    #[inline]
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs the search over available candidate records, merging
    /// already-committed records into slot building.
    pub fn run(
        &self,
        candidates: &[SailingRecord],
        booked_records: &[SailingRecord],
        booked_dates: &BTreeSet<Day>,
    ) -> SearchOutcome {
        self.run_with_stop(candidates, booked_records, booked_dates, None)
    }

    /// Like [`run`](Self::run), but checks `stop_flag` during
    /// enumeration so very large fleets can be cancelled externally.
    pub fn run_with_stop(
        &self,
        candidates: &[SailingRecord],
        booked_records: &[SailingRecord],
        booked_dates: &BTreeSet<Day>,
        stop_flag: Option<&AtomicBool>,
    ) -> SearchOutcome {
        let options = &self.options;
        let mut diagnostics = Vec::new();

        let (catalog, drops) = CatalogBuilder::new()
            .with_excluded_offer_patterns(options.excluded_offer_patterns.iter().cloned())
            .with_offer_lifecycles(options.offer_lifecycles.clone())
            .build(candidates, booked_records);
        diagnostics.extend(drops.iter().map(Diagnostic::from_record_drop));
        tracing::debug!(
            slots = catalog.len(),
            dropped = drops.len(),
            "slot aggregation complete"
        );

        if catalog.len() < 2 {
            return SearchOutcome {
                sets: Vec::new(),
                diagnostics,
                truncated: false,
            };
        }

        let adjacency = AdjacencyMap::build(&catalog, options.max_gap_days, &options.alias_table);

        let enumerator = ChainEnumerator::new(
            &catalog,
            &adjacency,
            options.min_chain_length,
            options.require_different_offers,
            options.budget,
            stop_flag,
        );
        let outcome = enumerator.enumerate();
        let (chains, visited, truncation) = outcome.into_chains();
        let truncated = truncation.is_some();
        if let Some(reason) = truncation {
            diagnostics.push(Diagnostic::SearchTruncated { visited, reason });
        }

        let maximal = dedup_chains(chains);

        let filter = ChainFilter::new(&catalog, options, booked_dates);
        let mut valid = Vec::with_capacity(maximal.len());
        for chain in maximal {
            let first_leg = chain.first().clone();
            let legs = chain.len();
            match filter.validate(chain) {
                Ok(validated) => valid.push(validated),
                Err(reason) => diagnostics.push(Diagnostic::ChainDropped {
                    first_leg,
                    legs,
                    reason,
                }),
            }
        }

        let selected = select_spaced(valid, &catalog, options.min_days_between_batches);

        let sets: Vec<BackToBackSet> = selected
            .into_iter()
            .filter_map(|vc| assemble(vc, &catalog))
            .collect();
        tracing::debug!(sets = sets.len(), "search complete");

        SearchOutcome {
            sets,
            diagnostics,
            truncated,
        }
    }
}

/// Convenience wrapper for one-shot callers.
pub fn find_back_to_back_sets(
    candidates: &[SailingRecord],
    booked_records: &[SailingRecord],
    booked_dates: &BTreeSet<Day>,
    options: SearchOptions,
) -> SearchOutcome {
    BackToBackSearch::new(options).run(candidates, booked_records, booked_dates)
}
