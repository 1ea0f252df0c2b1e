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

//! Stream Feeder (spec.md §4.6): reads the transaction source in order and
//! pushes [`StreamTuple`]s into the [`StreamBuffer`], observing the stop
//! signal and the `feed_interval` pacing knob.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use hybridjoin_common::PipelineCounters;

use crate::model::StreamTuple;
use crate::stream_buffer::StreamBuffer;

/// Abstracts the record-oriented transaction source (spec.md §6) so the
/// feeder doesn't need to know whether rows come from a CSV file, an
/// in-memory fixture, or something else entirely.
pub trait TransactionSource: Send {
    /// Returns the next raw row, or `None` once the source is exhausted.
    /// `Some(Err(_))` is a parse failure (spec.md §7 class 2): the feeder
    /// logs it, skips the row, and keeps going.
    fn next_row(&mut self) -> Option<Result<StreamTuple, anyhow::Error>>;
}

/// Runs until the source is exhausted or `stop` is observed. Intended to be
/// spawned as its own `tokio::task` (spec.md §5).
pub async fn stream_feeder<S: TransactionSource>(
    mut source: S,
    buffer: StreamBuffer,
    feed_interval: Duration,
    counters: &PipelineCounters,
    stop: CancellationToken,
) {
    loop {
        if stop.is_cancelled() {
            break;
        }

        match source.next_row() {
            Some(Ok(tuple)) => {
                counters.record_ingested(1);
                if buffer.push(tuple).await.is_err() {
                    // Worker side is gone; nothing left to feed.
                    break;
                }
            }
            Some(Err(err)) => {
                counters.record_row_skipped();
                warn!(error = %err, "skipping malformed transaction row");
            }
            None => break,
        }

        if !feed_interval.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(feed_interval) => {}
                _ = stop.cancelled() => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct VecSource {
        rows: std::vec::IntoIter<Result<StreamTuple, anyhow::Error>>,
    }

    impl TransactionSource for VecSource {
        fn next_row(&mut self) -> Option<Result<StreamTuple, anyhow::Error>> {
            self.rows.next()
        }
    }

    fn tuple(order_id: u64) -> StreamTuple {
        StreamTuple {
            order_id,
            customer_id: 1,
            product_id: "P001".into(),
            quantity: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn feeds_all_rows_in_source_order_and_skips_parse_errors() {
        let source = VecSource {
            rows: vec![
                Ok(tuple(1)),
                Err(anyhow::anyhow!("bad row")),
                Ok(tuple(2)),
            ]
            .into_iter(),
        };
        let (producer, mut consumer) = StreamBuffer::channel(None);
        let counters = PipelineCounters::new();
        stream_feeder(
            source,
            producer,
            Duration::from_millis(0),
            &counters,
            CancellationToken::new(),
        )
        .await;

        assert_eq!(consumer.pop().unwrap().order_id, 1);
        assert_eq!(consumer.pop().unwrap().order_id, 2);
        assert!(consumer.pop().is_none());
        let snapshot = counters.snapshot();
        assert_eq!(snapshot.ingested, 2);
        assert_eq!(snapshot.rows_skipped, 1);
    }

    #[tokio::test]
    async fn stops_immediately_when_stop_signal_already_set() {
        let source = VecSource {
            rows: vec![Ok(tuple(1))].into_iter(),
        };
        let (producer, mut consumer) = StreamBuffer::channel(None);
        let counters = PipelineCounters::new();
        let stop = CancellationToken::new();
        stop.cancel();
        stream_feeder(source, producer, Duration::from_millis(0), &counters, stop).await;
        assert!(consumer.pop().is_none());
    }
}
