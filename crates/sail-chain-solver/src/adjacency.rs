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

use sail_chain_core::prelude::DaySpan;
use sail_chain_model::prelude::{same_port, PortAliasTable, SlotCatalog, SlotKey};
use std::collections::BTreeMap;

/// A directed edge: the target slot may directly follow the source slot,
/// with `gap` idle days between return and next departure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    to: SlotKey,
    gap: DaySpan,
}

impl Edge {
    #[inline]
    pub fn new(to: SlotKey, gap: DaySpan) -> Self {
        Self { to, gap }
    }

    #[inline]
    pub fn to(&self) -> &SlotKey {
        &self.to
    }

    #[inline]
    pub fn gap(&self) -> DaySpan {
        self.gap
    }
}

/// Per-slot successor lists. Edges only ever connect slots of the same
/// vessel and always advance in time, so the graph is acyclic.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    successors: BTreeMap<SlotKey, Vec<Edge>>,
}

impl AdjacencyMap {
    /// Computes which slots may directly follow which, per vessel group.
    ///
    /// For a fixed predecessor the scan over later slots stops at the
    /// first over-max gap: with slots sorted by sail day the gap trends
    /// upward, so later candidates would miss the window too. This is a
    /// pruning heuristic, not a guarantee, when itinerary lengths are
    /// highly irregular.
    pub fn build(catalog: &SlotCatalog, max_gap_days: u32, aliases: &PortAliasTable) -> Self {
        let mut successors: BTreeMap<SlotKey, Vec<Edge>> = BTreeMap::new();
        let max_gap = DaySpan::new(max_gap_days as i32);

        for group in catalog.vessel_groups() {
            for (i, from) in group.iter().enumerate() {
                let mut edges = Vec::new();
                for to in group.iter().skip(i + 1) {
                    let gap = to.sail_day() - from.return_day();
                    if gap.is_negative() {
                        // Overlapping sailings; later ones may still fit.
                        continue;
                    }
                    if gap > max_gap {
                        break;
                    }
                    if !same_port(from.depart_port(), to.depart_port(), aliases) {
                        continue;
                    }
                    edges.push(Edge::new(to.key().clone(), gap));
                }
                if !edges.is_empty() {
                    successors.insert(from.key().clone(), edges);
                }
            }
        }

        tracing::debug!(
            slots = catalog.len(),
            edges = successors.values().map(Vec::len).sum::<usize>(),
            "adjacency built"
        );
        Self { successors }
    }

    #[inline]
    pub fn successors(&self, key: &SlotKey) -> &[Edge] {
        self.successors.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.successors.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &SlotKey> {
        self.successors.keys()
    }
}
