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

//! Disk Buffer (spec.md §4.4): a windowed loader of master-relation
//! partitions keyed by the join attribute.
//!
//! Generic over the row type `T` and its key type `K` so the same
//! implementation backs both the customer partition (`K = u64`) and the
//! product partition (`K = String`). The key column is always supplied
//! explicitly by the caller at construction (spec.md §9: auto-detection is
//! a source-convenience this spec doesn't reproduce).

use std::cmp::Ordering;

pub struct DiskBuffer<T, K> {
    rows: Vec<T>,
    partition_size: usize,
    key_of: fn(&T) -> K,
}

impl<T, K: Ord> DiskBuffer<T, K> {
    /// Sorts `rows` ascending by `key_of` and records `partition_size`.
    pub fn new(mut rows: Vec<T>, partition_size: usize, key_of: fn(&T) -> K) -> Self {
        rows.sort_by(|a, b| key_of(a).cmp(&key_of(b)));
        Self {
            rows,
            partition_size,
            key_of,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Loads the partition for `key` (spec.md §4.4):
    /// 1. binary search + linear scan for the matching range;
    /// 2. no matches -> empty;
    /// 3. matches fit in `partition_size` -> expand symmetrically around
    ///    the first match, clipped to `[0, len)`;
    /// 4. matches exceed `partition_size` -> return the first
    ///    `partition_size` matches (oversize keys are truncated).
    pub fn load_partition(&self, key: &K) -> Vec<&T> {
        let first = self
            .rows
            .partition_point(|r| (self.key_of)(r).cmp(key) == Ordering::Less);
        if first >= self.rows.len() || (self.key_of)(&self.rows[first]) != *key {
            return Vec::new();
        }
        let match_count = self.rows[first..]
            .iter()
            .take_while(|r| (self.key_of)(r) == *key)
            .count();

        if match_count <= self.partition_size {
            let start = first.saturating_sub(self.partition_size / 2);
            let end = (start + self.partition_size).min(self.rows.len());
            self.rows[start..end].iter().collect()
        } else {
            self.rows[first..first + self.partition_size].iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(rows: Vec<i32>, partition_size: usize) -> DiskBuffer<i32, i32> {
        DiskBuffer::new(rows, partition_size, |r| *r)
    }

    #[test]
    fn no_match_returns_empty() {
        let b = buf(vec![1, 2, 3], 10);
        assert!(b.load_partition(&99).is_empty());
    }

    #[test]
    fn small_match_expands_symmetrically_clipped_to_bounds() {
        let rows: Vec<i32> = (0..20).collect();
        let b = buf(rows, 6);
        let window = b.load_partition(&10);
        assert_eq!(window.len(), 6);
        assert!(window.contains(&&10));
    }

    #[test]
    fn window_clips_at_left_edge() {
        let rows: Vec<i32> = (0..20).collect();
        let b = buf(rows, 6);
        let window = b.load_partition(&0);
        assert_eq!(window.len(), 6);
        assert_eq!(*window[0], 0);
    }

    #[test]
    fn oversize_key_truncates_to_partition_size() {
        let rows = vec![5; 800];
        let b = buf(rows, 500);
        let window = b.load_partition(&5);
        assert_eq!(window.len(), 500);
        assert!(window.iter().all(|v| **v == 5));
    }
}
