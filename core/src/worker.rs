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

//! Join Worker (spec.md §4.7): the HYBRIDJOIN loop itself. Owns the Hash
//! Index, Arrival Queue and both Disk Buffers exclusively — no locking
//! needed per the discipline table in spec.md §5.

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;
use tokio_util::sync::CancellationToken;
use tracing::{error, trace, warn};

use hybridjoin_common::{HybridJoinError, PipelineCounters, Result};

use crate::arrival_queue::ArrivalQueue;
use crate::disk_buffer::DiskBuffer;
use crate::hash_index::HashIndex;
use crate::master_lookup::MasterLookup;
use crate::model::{date_id, CustomerRow, EnrichedFact, ProductRow, StreamTuple};
use crate::sink::WarehouseSink;
use crate::stream_buffer::StreamBufferConsumer;

/// Everything the join worker needs besides the live stream buffer: the
/// two master relations and the tunables from spec.md §6.
pub struct WorkerConfig {
    pub sink_retry_attempts: usize,
    pub idle_yield: Duration,
    pub drain_on_stop: bool,
}

/// Runs the HYBRIDJOIN loop until the stream is exhausted and the stop
/// signal has been observed (spec.md §5: "Worker drains ... then exits").
///
/// Intended to be spawned as its own `tokio::task` alongside
/// [`crate::feeder::stream_feeder`].
#[allow(clippy::too_many_arguments)]
pub async fn hybridjoin_worker<Sink: WarehouseSink>(
    mut buffer: StreamBufferConsumer,
    mut hash_index: HashIndex,
    mut arrival_queue: ArrivalQueue,
    customer_disk: DiskBuffer<CustomerRow, u64>,
    product_disk: DiskBuffer<ProductRow, String>,
    master_lookup: MasterLookup,
    sink: Sink,
    counters: &PipelineCounters,
    config: WorkerConfig,
    stop: CancellationToken,
) -> Result<()> {
    loop {
        // 1. Refill phase: pull as many stream tuples as there are free
        // slots, in source order.
        let mut slots_available = hash_index.available();
        while slots_available > 0 {
            let Some(tuple) = buffer.pop() else { break };
            let key = tuple.key();
            hash_index.insert(key, tuple);
            arrival_queue.enqueue(key);
            slots_available -= 1;
        }

        let should_stop = stop.is_cancelled();
        let drained = buffer.is_empty() && arrival_queue.is_empty() && hash_index.occupancy() == 0;
        if should_stop && (!config.drain_on_stop || drained) {
            return Ok(());
        }

        // 2. Select phase.
        let Some(key) = arrival_queue.dequeue() else {
            tokio::time::sleep(config.idle_yield).await;
            continue;
        };

        // 3. Probe phase (customer).
        let customer_partition = customer_disk.load_partition(&key);
        let found_customer = customer_partition
            .into_iter()
            .any(|row| row.customer_id == key);
        if !found_customer {
            // Either no rows loaded, or the loaded partition didn't
            // contain an exact match (spec.md §9 Open Question: treated
            // identically as a master miss).
            let released = hash_index.release_all(key);
            if !released.is_empty() {
                counters.record_released(released.len() as u64);
                trace!(customer_id = key, n = released.len(), "released: customer master miss");
            }
            continue;
        }

        // 4. Match phase: snapshot the current bucket so we can mutate the
        // index freely while enriching (a dequeue of an already-drained
        // key is a documented no-op, not an error).
        let matches: Vec<StreamTuple> = hash_index.get(key).to_vec();

        // 5. Enrichment phase.
        for stream_tuple in matches {
            let product_row = product_disk
                .load_partition(&stream_tuple.product_id)
                .into_iter()
                .find(|row| row.product_id == stream_tuple.product_id)
                .map(|row| (row.store_id, row.price))
                .or_else(|| master_lookup.get(&stream_tuple.product_id));

            let Some((store_id, price)) = product_row else {
                release_one(&mut hash_index, counters, key, &stream_tuple);
                continue;
            };

            let fact = EnrichedFact {
                order_id: stream_tuple.order_id,
                customer_id: stream_tuple.customer_id,
                product_id: stream_tuple.product_id.clone(),
                date_id: date_id(stream_tuple.date),
                store_id,
                purchase_amount: price * rust_decimal::Decimal::from(stream_tuple.quantity),
                quantity: stream_tuple.quantity,
            };

            match deliver_with_retry(&sink, fact, config.sink_retry_attempts).await {
                Ok(()) => {
                    if !hash_index.delete(key, &stream_tuple) {
                        error!(customer_id = key, "delete after emit failed");
                        return Err(HybridJoinError::Invariant(format!(
                            "hash index delete failed for key {key} after successful sink accept"
                        )));
                    }
                    counters.record_emitted();
                }
                Err(err) => {
                    warn!(error = %err, customer_id = key, "sink write exhausted retries, dead-lettering tuple");
                    counters.record_dead_lettered();
                    hash_index.delete(key, &stream_tuple);
                }
            }
        }
    }
}

fn release_one(
    hash_index: &mut HashIndex,
    counters: &PipelineCounters,
    key: u64,
    stream_tuple: &StreamTuple,
) {
    if hash_index.delete(key, stream_tuple) {
        counters.record_released(1);
        trace!(
            order_id = stream_tuple.order_id,
            product_id = %stream_tuple.product_id,
            "released: product master miss"
        );
    }
}

async fn deliver_with_retry<Sink: WarehouseSink>(
    sink: &Sink,
    fact: EnrichedFact,
    attempts: usize,
) -> anyhow::Result<()> {
    let strategy = ExponentialBackoff::from_millis(10).take(attempts.saturating_sub(1));
    Retry::spawn(strategy, || sink.accept(fact.clone())).await
}
