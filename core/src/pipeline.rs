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

//! Wires the Stream Feeder and Join Worker together as two cooperating
//! `tokio` tasks (spec.md §5), and owns the lifecycle handles the hosting
//! binary needs to await completion or request a graceful shutdown.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use hybridjoin_common::{CountersSnapshot, HybridJoinError, PipelineConfig, PipelineCounters, Result};

use crate::disk_buffer::DiskBuffer;
use crate::feeder::{stream_feeder, TransactionSource};
use crate::hash_index::HashIndex;
use crate::arrival_queue::ArrivalQueue;
use crate::master_lookup::MasterLookup;
use crate::model::{CustomerRow, ProductRow};
use crate::sink::WarehouseSink;
use crate::stream_buffer::StreamBuffer;
use crate::worker::{hybridjoin_worker, WorkerConfig};

/// Everything needed to run one pipeline instance.
pub struct Pipeline;

impl Pipeline {
    /// Spawns the feeder and worker tasks and returns a handle to control
    /// and await them. The main task owns lifecycle control per spec.md §5.
    pub fn spawn<S, Sink>(
        source: S,
        customer_disk: DiskBuffer<CustomerRow, u64>,
        product_disk: DiskBuffer<ProductRow, String>,
        master_lookup: MasterLookup,
        sink: Sink,
        config: PipelineConfig,
    ) -> PipelineHandle
    where
        S: TransactionSource + 'static,
        Sink: WarehouseSink + 'static,
    {
        let (producer, consumer) = StreamBuffer::channel(config.stream_buffer_bound);
        let counters = Arc::new(PipelineCounters::new());
        let stop = CancellationToken::new();

        let feeder_counters = counters.clone();
        let feeder_stop = stop.clone();
        let feed_interval = config.feed_interval;
        let feeder = tokio::spawn(async move {
            stream_feeder(source, producer, feed_interval, &feeder_counters, feeder_stop).await;
        });

        let worker_counters = counters.clone();
        let worker_stop = stop.clone();
        let worker_config = WorkerConfig {
            sink_retry_attempts: config.sink_retry_attempts,
            idle_yield: config.idle_yield,
            drain_on_stop: config.drain_on_stop,
        };
        let hash_index = HashIndex::new(config.hash_index_capacity);
        let worker = tokio::spawn(async move {
            hybridjoin_worker(
                consumer,
                hash_index,
                ArrivalQueue::new(),
                customer_disk,
                product_disk,
                master_lookup,
                sink,
                &worker_counters,
                worker_config,
                worker_stop,
            )
            .await
        });

        PipelineHandle {
            feeder,
            worker,
            stop,
            counters,
        }
    }
}

pub struct PipelineHandle {
    feeder: JoinHandle<()>,
    worker: JoinHandle<Result<()>>,
    stop: CancellationToken,
    counters: Arc<PipelineCounters>,
}

impl PipelineHandle {
    /// A clone of the stop signal; cancel it to request a graceful
    /// shutdown (spec.md §5).
    pub fn stop_signal(&self) -> CancellationToken {
        self.stop.clone()
    }

    pub fn counters(&self) -> Arc<PipelineCounters> {
        self.counters.clone()
    }

    /// Awaits both tasks to completion. Class-1/5 errors from the worker
    /// (spec.md §7) propagate here; the caller is expected to abort the
    /// process on `Err`.
    pub async fn join(self) -> Result<CountersSnapshot> {
        let (feeder_result, worker_result) = tokio::join!(self.feeder, self.worker);
        feeder_result.map_err(|e| HybridJoinError::Invariant(format!("feeder task panicked: {e}")))?;
        worker_result.map_err(|e| HybridJoinError::Invariant(format!("worker task panicked: {e}")))??;
        Ok(self.counters.snapshot())
    }
}
