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

use chrono::{Datelike, NaiveDate};
use num_traits::{CheckedAdd, CheckedSub, Zero};
use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// A calendar day, stored as the number of days since the Common Era.
///
/// All scheduling arithmetic happens on this integer representation;
/// `chrono` only appears at the conversion boundary.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(i32);

impl Day {
    #[inline]
    pub const fn new(days_from_ce: i32) -> Self {
        Day(days_from_ce)
    }

    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Day(date.num_days_from_ce())
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Converts back to a calendar date. `None` for values outside the
    /// range `chrono` can represent.
    #[inline]
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.0)
    }

    #[inline]
    pub fn checked_add(self, d: DaySpan) -> Option<Self> {
        self.0.checked_add(d.0).map(Day)
    }

    #[inline]
    pub fn checked_sub(self, d: DaySpan) -> Option<Self> {
        self.0.checked_sub(d.0).map(Day)
    }

    #[inline]
    pub fn saturating_add(self, d: DaySpan) -> Self {
        Day(self.0.saturating_add(d.0))
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_date() {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            None => write!(f, "Day({})", self.0),
        }
    }
}

impl Add<DaySpan> for Day {
    type Output = Day;

    #[inline]
    fn add(self, rhs: DaySpan) -> Self::Output {
        Day(self.0.checked_add(rhs.0).expect("error in Day + DaySpan"))
    }
}

impl AddAssign<DaySpan> for Day {
    fn add_assign(&mut self, rhs: DaySpan) {
        self.0 = self.0.checked_add(rhs.0).expect("error in Day += DaySpan");
    }
}

impl Sub<DaySpan> for Day {
    type Output = Day;

    #[inline]
    fn sub(self, rhs: DaySpan) -> Self::Output {
        Day(self.0.checked_sub(rhs.0).expect("error in Day - DaySpan"))
    }
}

impl SubAssign<DaySpan> for Day {
    fn sub_assign(&mut self, rhs: DaySpan) {
        self.0 = self.0.checked_sub(rhs.0).expect("error in Day -= DaySpan");
    }
}

impl Sub<Day> for Day {
    type Output = DaySpan;

    #[inline]
    fn sub(self, rhs: Day) -> Self::Output {
        DaySpan(self.0.checked_sub(rhs.0).expect("error in Day - Day"))
    }
}

/// A signed number of calendar days between two `Day`s.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySpan(i32);

impl DaySpan {
    #[inline]
    pub const fn new(days: i32) -> Self {
        DaySpan(days)
    }

    #[inline]
    pub const fn value(&self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub fn abs(self) -> Self {
        DaySpan(self.0.abs())
    }
}

impl std::fmt::Display for DaySpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.0)
    }
}

impl Zero for DaySpan {
    #[inline]
    fn zero() -> Self {
        DaySpan(0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for DaySpan {
    type Output = DaySpan;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        DaySpan(
            self.0
                .checked_add(rhs.0)
                .expect("error in DaySpan + DaySpan"),
        )
    }
}

impl AddAssign for DaySpan {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for DaySpan {
    type Output = DaySpan;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        DaySpan(
            self.0
                .checked_sub(rhs.0)
                .expect("error in DaySpan - DaySpan"),
        )
    }
}

impl SubAssign for DaySpan {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for DaySpan {
    type Output = DaySpan;

    #[inline]
    fn neg(self) -> Self::Output {
        DaySpan(self.0.checked_neg().expect("error in -DaySpan"))
    }
}

impl CheckedAdd for DaySpan {
    #[inline]
    fn checked_add(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(DaySpan)
    }
}

impl CheckedSub for DaySpan {
    #[inline]
    fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(DaySpan)
    }
}

impl Sum for DaySpan {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DaySpan::zero(), |acc, d| acc + d)
    }
}
