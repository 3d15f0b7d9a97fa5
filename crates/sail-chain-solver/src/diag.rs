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

use sail_chain_core::prelude::Day;
use sail_chain_model::catalog::RecordDrop;
use sail_chain_model::slot::SlotKey;
use serde::Serialize;

/// Why the chain enumeration stopped before exploring everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    BudgetExhausted,
    Interrupted,
}

impl std::fmt::Display for TruncationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TruncationReason::BudgetExhausted => write!(f, "node-visit budget exhausted"),
            TruncationReason::Interrupted => write!(f, "interrupt signal received"),
        }
    }
}

/// Why a discovered chain was removed before selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainDropReason {
    NoValidOffers { slot: SlotKey },
    OverNightsCap { total_nights: i32, cap: u32 },
    BookedDateConflict { day: Day },
}

impl std::fmt::Display for ChainDropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainDropReason::NoValidOffers { slot } => {
                write!(f, "no valid offers remain for leg {}", slot)
            }
            ChainDropReason::OverNightsCap { total_nights, cap } => {
                write!(f, "{} total nights exceed the cap of {}", total_nights, cap)
            }
            ChainDropReason::BookedDateConflict { day } => {
                write!(f, "chain touches already-booked date {}", day)
            }
        }
    }
}

/// One anomaly observed during a search run. Returned alongside the
/// results so callers can tell a legitimately empty output from input
/// that was rejected for a reason; nothing in the pipeline throws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Diagnostic {
    RecordDropped {
        source: String,
        index: usize,
        detail: String,
    },
    ChainDropped {
        first_leg: SlotKey,
        legs: usize,
        reason: ChainDropReason,
    },
    SearchTruncated {
        visited: u64,
        reason: TruncationReason,
    },
}

impl Diagnostic {
    pub fn from_record_drop(drop: &RecordDrop) -> Self {
        Diagnostic::RecordDropped {
            source: drop.source().to_string(),
            index: drop.index(),
            detail: drop.reason().to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::RecordDropped {
                source,
                index,
                detail,
            } => write!(f, "{} record #{} dropped: {}", source, index, detail),
            Diagnostic::ChainDropped {
                first_leg,
                legs,
                reason,
            } => write!(
                f,
                "{}-leg chain starting {} dropped: {}",
                legs, first_leg, reason
            ),
            Diagnostic::SearchTruncated { visited, reason } => {
                write!(f, "search truncated after {} visits: {}", visited, reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_human_readable() {
        let d = Diagnostic::SearchTruncated {
            visited: 42,
            reason: TruncationReason::BudgetExhausted,
        };
        assert_eq!(
            d.to_string(),
            "search truncated after 42 visits: node-visit budget exhausted"
        );
    }

    #[test]
    fn test_chain_drop_reason_display() {
        let r = ChainDropReason::OverNightsCap {
            total_nights: 16,
            cap: 14,
        };
        assert_eq!(r.to_string(), "16 total nights exceed the cap of 14");
    }
}
