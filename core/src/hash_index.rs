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

//! Hash Index (spec.md §4.2): a fixed-capacity multi-map from
//! `customer_id` to stream tuples.
//!
//! Unlike `examples/original_source/src/hybrid_join/hash_table.py` (which
//! silently overwrites same-key entries), this is a true multi-map: two
//! transactions for the same customer both survive until both are emitted.
//! Consumer-only (owned by the join worker), so no internal lock is needed
//! (spec.md §5).

use std::collections::HashMap;

use crate::model::StreamTuple;

pub struct HashIndex {
    capacity: usize,
    slots_available: usize,
    total_entries: u64,
    table: HashMap<u64, Vec<StreamTuple>>,
}

impl HashIndex {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots_available: capacity,
            total_entries: 0,
            table: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current free slot count. One slot == one inserted value, not one
    /// distinct key (spec.md §4.2).
    pub fn available(&self) -> usize {
        self.slots_available
    }

    pub fn occupancy(&self) -> usize {
        self.capacity - self.slots_available
    }

    pub fn total_entries(&self) -> u64 {
        self.total_entries
    }

    /// Appends `value` to the bucket for `key`. The caller must have
    /// already checked `available() > 0`; inserting past capacity is a
    /// programmer error, not a recoverable one, since it would silently
    /// violate invariant 2.
    pub fn insert(&mut self, key: u64, value: StreamTuple) {
        debug_assert!(self.slots_available > 0, "hash index insert past capacity");
        self.table.entry(key).or_default().push(value);
        self.slots_available = self.slots_available.saturating_sub(1);
        self.total_entries += 1;
    }

    /// Every value currently stored for `key`, in insertion order (which
    /// equals source arrival order per invariant 3).
    pub fn get(&self, key: u64) -> &[StreamTuple] {
        self.table.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes the first entry whose value equals `value`. Returns `true`
    /// on success, frees one slot.
    pub fn delete(&mut self, key: u64, value: &StreamTuple) -> bool {
        let Some(bucket) = self.table.get_mut(&key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|v| v == value) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.table.remove(&key);
        }
        self.slots_available += 1;
        true
    }

    /// Drops every entry for `key` without emitting it, freeing the
    /// associated slots. Used when a key is released (spec.md §7 class 3).
    pub fn release_all(&mut self, key: u64) -> Vec<StreamTuple> {
        let Some(bucket) = self.table.remove(&key) else {
            return Vec::new();
        };
        self.slots_available += bucket.len();
        bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tuple(order_id: u64, customer_id: u64) -> StreamTuple {
        StreamTuple {
            order_id,
            customer_id,
            product_id: "P001".into(),
            quantity: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn multimap_keeps_duplicate_keys() {
        let mut idx = HashIndex::new(10);
        idx.insert(1, tuple(100, 1));
        idx.insert(1, tuple(101, 1));
        assert_eq!(idx.get(1).len(), 2);
        assert_eq!(idx.occupancy(), 2);
    }

    #[test]
    fn delete_removes_first_matching_value_only() {
        let mut idx = HashIndex::new(10);
        let a = tuple(100, 1);
        let b = tuple(101, 1);
        idx.insert(1, a.clone());
        idx.insert(1, b.clone());
        assert!(idx.delete(1, &a));
        assert_eq!(idx.get(1), &[b]);
        assert_eq!(idx.available(), 9);
    }

    #[test]
    fn delete_of_absent_value_returns_false() {
        let mut idx = HashIndex::new(10);
        assert!(!idx.delete(1, &tuple(100, 1)));
    }

    #[test]
    fn release_all_frees_every_slot_for_key() {
        let mut idx = HashIndex::new(10);
        idx.insert(1, tuple(100, 1));
        idx.insert(1, tuple(101, 1));
        idx.insert(2, tuple(102, 2));
        let released = idx.release_all(1);
        assert_eq!(released.len(), 2);
        assert_eq!(idx.available(), 9);
        assert!(idx.get(1).is_empty());
        assert_eq!(idx.get(2).len(), 1);
    }

    #[test]
    fn occupancy_never_exceeds_capacity() {
        let mut idx = HashIndex::new(2);
        idx.insert(1, tuple(1, 1));
        idx.insert(2, tuple(2, 2));
        assert_eq!(idx.available(), 0);
        assert_eq!(idx.occupancy(), idx.capacity());
    }
}
