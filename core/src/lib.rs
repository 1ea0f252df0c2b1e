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

//! The HYBRIDJOIN engine: a streaming equi-join operator that couples an
//! in-memory stream index with a disk-partitioned probe over a
//! slowly-changing master relation.
//!
//! See `SPEC_FULL.md` §4 for the component contracts this module
//! implements: [`stream_buffer`], [`hash_index`], [`arrival_queue`],
//! [`disk_buffer`], [`master_lookup`], [`feeder`] and [`worker`].

pub mod arrival_queue;
pub mod disk_buffer;
pub mod feeder;
pub mod hash_index;
pub mod master_lookup;
pub mod model;
pub mod pipeline;
pub mod sink;
pub mod stream_buffer;
pub mod worker;

pub use arrival_queue::ArrivalQueue;
pub use disk_buffer::DiskBuffer;
pub use feeder::TransactionSource;
pub use hash_index::HashIndex;
pub use master_lookup::MasterLookup;
pub use model::{date_id, CustomerRow, EnrichedFact, ProductRow, StreamTuple};
pub use pipeline::{Pipeline, PipelineHandle};
pub use sink::WarehouseSink;
pub use stream_buffer::{StreamBuffer, StreamBufferConsumer};
pub use worker::WorkerConfig;
