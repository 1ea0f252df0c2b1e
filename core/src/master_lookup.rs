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

//! Master Lookup (spec.md §4.5): an in-memory `product_id -> (store_id,
//! price)` dictionary built once at startup, used when the product Disk
//! Buffer partition misses a probe.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::model::ProductRow;

pub struct MasterLookup {
    table: HashMap<String, (u32, Decimal)>,
}

impl MasterLookup {
    pub fn build(products: &[ProductRow]) -> Self {
        let table = products
            .iter()
            .map(|p| (p.product_id.clone(), (p.store_id, p.price)))
            .collect();
        Self { table }
    }

    pub fn get(&self, product_id: &str) -> Option<(u32, Decimal)> {
        self.table.get(product_id).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_projection_from_product_rows() {
        let rows = vec![ProductRow {
            product_id: "P001".into(),
            category: "Grocery".into(),
            name: "Acme".into(),
            supplier_id: 10,
            supplier_name: "Acme".into(),
            store_id: 1,
            price: Decimal::new(350, 2),
        }];
        let lookup = MasterLookup::build(&rows);
        assert_eq!(lookup.get("P001"), Some((1, Decimal::new(350, 2))));
        assert_eq!(lookup.get("missing"), None);
    }
}
