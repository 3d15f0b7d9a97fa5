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

use crate::calendar::{Day, DaySpan};
use serde::Serialize;

/// An inclusive range of calendar days `[start, end]`.
///
/// Sailings occupy whole days at both ends (embark and debark), so the
/// inclusive representation matches how trips block a calendar.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DayInterval {
    start: Day,
    end: Day,
}

impl DayInterval {
    /// Creates a new interval. Endpoints are reordered if given reversed.
    #[inline]
    pub fn new(a: Day, b: Day) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    #[inline]
    pub const fn start(&self) -> Day {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Day {
        self.end
    }

    #[inline]
    pub fn length(&self) -> DaySpan {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, day: Day) -> bool {
        self.start <= day && day <= self.end
    }

    #[inline]
    pub fn overlaps(&self, other: &DayInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Calendar days strictly between this interval and a later one.
    ///
    /// Zero means `other` starts the day this interval ends; negative
    /// means the two overlap. The spacing selector treats both
    /// directions symmetrically by calling this on the earlier interval.
    #[inline]
    pub fn gap_to(&self, other: &DayInterval) -> DaySpan {
        other.start - self.end
    }
}

impl std::fmt::Display for DayInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
