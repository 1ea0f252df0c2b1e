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

//! Arrival Queue (spec.md §4.3): strict FIFO of keys, drives oldest-first
//! probing. The original's doubly-linked list isn't load-bearing (spec.md
//! §9); a `VecDeque` gives the same O(1) push/pop at both ends with less
//! bookkeeping.

use std::collections::VecDeque;

#[derive(Default)]
pub struct ArrivalQueue {
    queue: VecDeque<u64>,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, key: u64) {
        self.queue.push_back(key);
    }

    pub fn dequeue(&mut self) -> Option<u64> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_fifo_order() {
        let mut q = ArrivalQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(1);
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn duplicate_keys_tracked_as_distinct_nodes() {
        let mut q = ArrivalQueue::new();
        q.enqueue(7);
        q.enqueue(7);
        assert_eq!(q.len(), 2);
    }
}
