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

//! Warehouse Sink (spec.md §6): the core treats the warehouse as an opaque
//! `accept(F) -> Result` collaborator. Modeled after the teacher's
//! `SinkWriter` trait (`risingwave_connector::sink::SinkWriter`), trimmed
//! to the single non-batched, non-epoched method the core actually needs.

use async_trait::async_trait;

use crate::model::EnrichedFact;

/// A single write may fail transiently; the worker is responsible for
/// retry/backoff (spec.md §7 class 4), not the sink itself.
#[async_trait]
pub trait WarehouseSink: Send + Sync {
    async fn accept(&self, fact: EnrichedFact) -> anyhow::Result<()>;
}
