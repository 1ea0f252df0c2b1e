// Copyright 2026 HybridJoin Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Data model (spec.md §3).

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// One inbound transaction. Immutable after arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamTuple {
    pub order_id: u64,
    pub customer_id: u64,
    pub product_id: String,
    pub quantity: u32,
    pub date: NaiveDate,
}

impl StreamTuple {
    /// The join key this tuple is indexed and probed by.
    pub fn key(&self) -> u64 {
        self.customer_id
    }
}

/// Customer master relation row (`R_c`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub customer_id: u64,
    pub gender: String,
    pub age_bucket: String,
    pub occupation: u32,
    pub city_category: String,
    pub years_in_city: String,
    pub marital_status: u32,
}

/// Product master relation row (`R_p`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product_id: String,
    pub category: String,
    pub name: String,
    pub supplier_id: u32,
    pub supplier_name: String,
    pub store_id: u32,
    pub price: Decimal,
}

/// A fully joined row, ready for the warehouse sink. Derived, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFact {
    pub order_id: u64,
    pub customer_id: u64,
    pub product_id: String,
    pub date_id: u32,
    pub store_id: u32,
    pub purchase_amount: Decimal,
    pub quantity: u32,
}

/// `yyyymmdd(date)` per spec.md §3/§8.
pub fn date_id(date: NaiveDate) -> u32 {
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_id_formats_as_yyyymmdd() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(date_id(d), 20_250_110);
    }
}
