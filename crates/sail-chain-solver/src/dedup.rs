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

use crate::chain::Chain;
use sail_chain_model::prelude::SlotKey;
use std::collections::BTreeSet;

/// Removes exact duplicates and chains wholly contained as a contiguous
/// run inside a longer discovered chain, keeping only maximal chains.
/// Containment is checked over typed slot-key sequences; the discovery
/// order of the survivors is preserved.
pub fn dedup_chains(chains: Vec<Chain>) -> Vec<Chain> {
    let mut seen: BTreeSet<Vec<SlotKey>> = BTreeSet::new();
    let mut unique: Vec<Chain> = Vec::with_capacity(chains.len());
    for chain in chains {
        if seen.insert(chain.slots().to_vec()) {
            unique.push(chain);
        }
    }

    let before = unique.len();
    let kept: Vec<Chain> = unique
        .iter()
        .filter(|candidate| {
            !unique
                .iter()
                .any(|other| other.len() > candidate.len() && candidate.is_sub_chain_of(other))
        })
        .cloned()
        .collect();

    tracing::debug!(
        discovered = before,
        maximal = kept.len(),
        "chain dedup/subsumption"
    );
    kept
}
