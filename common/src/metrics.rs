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

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared between the feeder and worker tasks (spec.md §5: "both
/// sides" touch these, hence atomics rather than a lock).
///
/// `ingested == emitted + released + dead_lettered + indexed` must hold at
/// every quiescent point (spec.md §8's `released` also counts dead-letter
/// drops, per the glossary's "Release" entry; they're split here into two
/// counters since the worker logs them under different messages).
/// `indexed` isn't tracked directly — it's always derivable from the rest.
#[derive(Default)]
pub struct PipelineCounters {
    ingested: AtomicU64,
    emitted: AtomicU64,
    released: AtomicU64,
    dead_lettered: AtomicU64,
    rows_skipped: AtomicU64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ingested(&self, n: u64) {
        self.ingested.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_released(&self, n: u64) {
        self.released.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_dead_lettered(&self) {
        self.dead_lettered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_row_skipped(&self) {
        self.rows_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            ingested: self.ingested.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            dead_lettered: self.dead_lettered.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountersSnapshot {
    pub ingested: u64,
    pub emitted: u64,
    pub released: u64,
    pub dead_lettered: u64,
    pub rows_skipped: u64,
}

impl CountersSnapshot {
    /// Currently-indexed tuples, derived per spec.md §8's invariant
    /// `emitted + released + dead_lettered + indexed == ingested`.
    pub fn currently_indexed(&self) -> u64 {
        self.ingested
            .saturating_sub(self.emitted)
            .saturating_sub(self.released)
            .saturating_sub(self.dead_lettered)
    }
}
