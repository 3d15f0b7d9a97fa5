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

use crate::record::SailingRecord;
use serde::{Deserialize, Serialize};

/// One bookable variant attached to a slot. Several records can collapse
/// into the same offer; the (code, cabin, guests) triple is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    code: String,
    name: String,
    cabin_type: String,
    guest_count: u32,
    price: Option<f64>,
    onboard_credit: Option<f64>,
}

impl Offer {
    #[inline]
    pub fn new(
        code: String,
        name: String,
        cabin_type: String,
        guest_count: u32,
        price: Option<f64>,
        onboard_credit: Option<f64>,
    ) -> Self {
        Self {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            cabin_type: cabin_type.trim().to_string(),
            guest_count,
            price,
            onboard_credit,
        }
    }

    pub fn from_record(record: &SailingRecord) -> Self {
        Self::new(
            record.offer_code.clone().unwrap_or_default(),
            record.offer_name.clone().unwrap_or_default(),
            record.cabin_type.clone().unwrap_or_default(),
            record.guest_count.unwrap_or(0),
            record.price,
            record.onboard_credit,
        )
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn cabin_type(&self) -> &str {
        &self.cabin_type
    }

    #[inline]
    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    #[inline]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    #[inline]
    pub fn onboard_credit(&self) -> Option<f64> {
        self.onboard_credit
    }

    #[inline]
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    /// Identity used to merge duplicate records within one slot.
    #[inline]
    pub fn dedup_key(&self) -> (String, String, u32) {
        (
            self.code.to_ascii_lowercase(),
            self.cabin_type.to_ascii_lowercase(),
            self.guest_count,
        )
    }

    /// Case-insensitive substring match of any configured pattern against
    /// the offer code or name. Used for promotional-exclusion families.
    pub fn matches_any_pattern(&self, patterns: &[String]) -> bool {
        if patterns.is_empty() {
            return false;
        }
        let code = self.code.to_ascii_lowercase();
        let name = self.name.to_ascii_lowercase();
        patterns.iter().any(|p| {
            let p = p.trim().to_ascii_lowercase();
            !p.is_empty() && (code.contains(&p) || name.contains(&p))
        })
    }
}

impl std::fmt::Display for Offer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.code.is_empty() {
            write!(f, "(uncoded offer)")
        } else {
            write!(f, "{}", self.code)?;
            if !self.cabin_type.is_empty() {
                write!(f, " [{}]", self.cabin_type)?;
            }
            Ok(())
        }
    }
}
