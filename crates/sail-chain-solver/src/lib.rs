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

pub mod adjacency;
pub mod assemble;
pub mod chain;
pub mod dedup;
pub mod diag;
pub mod enumerate;
pub mod filters;
pub mod options;
pub mod search;
pub mod select;

pub mod prelude {
    pub use crate::adjacency::{AdjacencyMap, Edge};
    pub use crate::assemble::{
        assemble, expand_to_display, summarize, AnnotatedSailing, BackToBackSet, Leg,
    };
    pub use crate::chain::Chain;
    pub use crate::dedup::dedup_chains;
    pub use crate::diag::{ChainDropReason, Diagnostic, TruncationReason};
    pub use crate::enumerate::{ChainEnumerator, EnumerationOutcome};
    pub use crate::filters::{ChainFilter, ValidatedChain};
    pub use crate::options::{SearchBudget, SearchOptions};
    pub use crate::search::{find_back_to_back_sets, BackToBackSearch, SearchOutcome};
    pub use crate::select::select_spaced;
}
