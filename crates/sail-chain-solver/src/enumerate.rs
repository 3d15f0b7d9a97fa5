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
    adjacency::{AdjacencyMap, Edge},
    chain::Chain,
    diag::TruncationReason,
    options::SearchBudget,
};
use sail_chain_core::prelude::DaySpan;
use sail_chain_model::prelude::{SlotCatalog, SlotKey};
use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicBool, Ordering},
};

/// Everything the depth-first enumeration produced, including how far it
/// got when a budget or interrupt cut it short.
#[derive(Debug, Clone)]
pub struct EnumerationOutcome {
    chains: Vec<Chain>,
    visited: u64,
    truncation: Option<TruncationReason>,
}

impl EnumerationOutcome {
    #[inline]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    #[inline]
    pub fn visited(&self) -> u64 {
        self.visited
    }

    #[inline]
    pub fn truncation(&self) -> Option<TruncationReason> {
        self.truncation
    }

    #[inline]
    pub fn into_chains(self) -> (Vec<Chain>, u64, Option<TruncationReason>) {
        (self.chains, self.visited, self.truncation)
    }
}

struct Frame<'a> {
    edges: &'a [Edge],
    next_edge: usize,
    consumed_code: Option<String>,
}

enum Enter {
    Entered,
    Pruned,
    Halt(TruncationReason),
}

/// Depth-first search over the adjacency graph, launched once per slot.
///
/// The graph is acyclic by construction (edges strictly advance in
/// time), so path state is the only bookkeeping: an explicit frame stack
/// instead of recursion with a shared visited set.
pub struct ChainEnumerator<'a> {
    catalog: &'a SlotCatalog,
    adjacency: &'a AdjacencyMap,
    min_chain_length: usize,
    require_different_offers: bool,
    budget: SearchBudget,
    stop_flag: Option<&'a AtomicBool>,
}

impl<'a> ChainEnumerator<'a> {
    pub fn new(
        catalog: &'a SlotCatalog,
        adjacency: &'a AdjacencyMap,
        min_chain_length: usize,
        require_different_offers: bool,
        budget: SearchBudget,
        stop_flag: Option<&'a AtomicBool>,
    ) -> Self {
        Self {
            catalog,
            adjacency,
            min_chain_length: min_chain_length.max(1),
            require_different_offers,
            budget,
            stop_flag,
        }
    }

    pub fn enumerate(&self) -> EnumerationOutcome {
        let mut chains = Vec::new();
        let mut visited: u64 = 0;
        let mut truncation = None;

        'starts: for start in self.catalog.iter() {
            let mut stack: Vec<Frame<'a>> = Vec::new();
            let mut path: Vec<SlotKey> = Vec::new();
            let mut gaps: Vec<DaySpan> = Vec::new();
            let mut used_codes: BTreeSet<String> = BTreeSet::new();

            match self.enter(
                start.key(),
                None,
                &mut stack,
                &mut path,
                &mut gaps,
                &mut used_codes,
                &mut chains,
                &mut visited,
            ) {
                Enter::Entered => {}
                Enter::Pruned => continue 'starts,
                Enter::Halt(reason) => {
                    truncation = Some(reason);
                    break 'starts;
                }
            }

            loop {
                let Some(frame) = stack.last_mut() else {
                    break;
                };
                // The edge slice borrows from the adjacency map, not the
                // frame, so the stack stays free to mutate below.
                let edges: &'a [Edge] = frame.edges;
                let Some(edge) = edges.get(frame.next_edge) else {
                    let finished = stack.pop().expect("stack is non-empty here");
                    if let Some(code) = finished.consumed_code {
                        used_codes.remove(&code);
                    }
                    path.pop();
                    if !stack.is_empty() {
                        gaps.pop();
                    }
                    continue;
                };
                frame.next_edge += 1;

                debug_assert!(
                    edge.to().sail_day() >= path[path.len() - 1].sail_day(),
                    "edges must advance in time"
                );
                debug_assert!(!path.contains(edge.to()), "the adjacency graph is acyclic");

                match self.enter(
                    edge.to(),
                    Some(edge.gap()),
                    &mut stack,
                    &mut path,
                    &mut gaps,
                    &mut used_codes,
                    &mut chains,
                    &mut visited,
                ) {
                    Enter::Entered | Enter::Pruned => {}
                    Enter::Halt(reason) => {
                        truncation = Some(reason);
                        break 'starts;
                    }
                }
            }
        }

        tracing::debug!(
            chains = chains.len(),
            visited,
            truncated = truncation.is_some(),
            "chain enumeration finished"
        );
        EnumerationOutcome {
            chains,
            visited,
            truncation,
        }
    }

    /// Tries to extend the current path with `key`. On success pushes a
    /// frame and records the path as a candidate chain once it is long
    /// enough; every sufficiently long prefix is recorded, the
    /// subsumption filter keeps only maximal ones.
    #[allow(clippy::too_many_arguments)]
    fn enter(
        &self,
        key: &SlotKey,
        gap: Option<DaySpan>,
        stack: &mut Vec<Frame<'a>>,
        path: &mut Vec<SlotKey>,
        gaps: &mut Vec<DaySpan>,
        used_codes: &mut BTreeSet<String>,
        chains: &mut Vec<Chain>,
        visited: &mut u64,
    ) -> Enter {
        if self
            .stop_flag
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            return Enter::Halt(TruncationReason::Interrupted);
        }
        if self.budget.is_exhausted(*visited) {
            return Enter::Halt(TruncationReason::BudgetExhausted);
        }
        *visited += 1;

        let mut consumed_code = None;
        if self.require_different_offers {
            let Some(slot) = self.catalog.get(key) else {
                return Enter::Pruned;
            };
            let unused = slot
                .offers()
                .iter()
                .filter(|o| o.has_code())
                .map(|o| o.code().to_ascii_lowercase())
                .find(|code| !used_codes.contains(code));
            let has_uncoded = slot.offers().iter().any(|o| !o.has_code());
            match unused {
                Some(code) => {
                    used_codes.insert(code.clone());
                    consumed_code = Some(code);
                }
                // The first leg is exempt; beyond it a leg must still
                // have something bookable that no earlier leg consumed.
                None if path.is_empty() || has_uncoded => {}
                None => return Enter::Pruned,
            }
        }

        path.push(key.clone());
        if let Some(gap) = gap {
            gaps.push(gap);
        }
        stack.push(Frame {
            edges: self.adjacency.successors(key),
            next_edge: 0,
            consumed_code,
        });

        if path.len() >= self.min_chain_length {
            chains.push(Chain::from_parts(path.clone(), gaps.clone()));
        }
        Enter::Entered
    }
}
