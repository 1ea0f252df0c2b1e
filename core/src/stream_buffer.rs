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

//! Stream Buffer (spec.md §4.1): a bounded or unbounded FIFO staging area
//! between the feeder and the worker.
//!
//! Built on `tokio::sync::mpsc` rather than a hand-rolled `Mutex<VecDeque>`:
//! a single-producer single-consumer channel already gives us the FIFO and
//! thread-safety the spec asks for, and `send().await` on a bounded channel
//! *is* the back-pressure mechanism §4.1 and §5 require of the feeder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::model::StreamTuple;

enum Sender {
    Bounded(mpsc::Sender<StreamTuple>),
    Unbounded(mpsc::UnboundedSender<StreamTuple>),
}

enum Receiver {
    Bounded(mpsc::Receiver<StreamTuple>),
    Unbounded(mpsc::UnboundedReceiver<StreamTuple>),
}

/// The feeder's half of the stream buffer.
pub struct StreamBuffer {
    sender: Sender,
    len: Arc<AtomicUsize>,
}

/// The worker's half of the stream buffer.
pub struct StreamBufferConsumer {
    receiver: Receiver,
    len: Arc<AtomicUsize>,
}

impl StreamBuffer {
    /// Builds a connected producer/consumer pair. `bound` of `None` yields
    /// an unbounded buffer (spec.md §6 `stream_buffer_bound`).
    pub fn channel(bound: Option<usize>) -> (StreamBuffer, StreamBufferConsumer) {
        let len = Arc::new(AtomicUsize::new(0));
        let (sender, receiver) = match bound {
            Some(n) => {
                let (tx, rx) = mpsc::channel(n.max(1));
                (Sender::Bounded(tx), Receiver::Bounded(rx))
            }
            None => {
                let (tx, rx) = mpsc::unbounded_channel();
                (Sender::Unbounded(tx), Receiver::Unbounded(rx))
            }
        };
        (
            StreamBuffer {
                sender,
                len: len.clone(),
            },
            StreamBufferConsumer { receiver, len },
        )
    }

    /// Pushes a tuple, applying back-pressure by awaiting if the buffer is
    /// bounded and full. Only fails once the consumer has been dropped.
    pub async fn push(&self, tuple: StreamTuple) -> Result<(), StreamTuple> {
        let result = match &self.sender {
            Sender::Bounded(tx) => tx.send(tuple).await.map_err(|e| e.0),
            Sender::Unbounded(tx) => tx.send(tuple).map_err(|e| e.0),
        };
        if result.is_ok() {
            self.len.fetch_add(1, Ordering::AcqRel);
        }
        result
    }
}

impl StreamBufferConsumer {
    /// Non-blocking pop: returns `None` immediately when the buffer is
    /// empty rather than waiting for the next push (spec.md §4.1).
    pub fn pop(&mut self) -> Option<StreamTuple> {
        let item = match &mut self.receiver {
            Receiver::Bounded(rx) => rx.try_recv().ok(),
            Receiver::Unbounded(rx) => rx.try_recv().ok(),
        };
        if item.is_some() {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        item
    }

    pub fn size(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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
    async fn fifo_order_preserved() {
        let (producer, mut consumer) = StreamBuffer::channel(None);
        producer.push(tuple(1)).await.unwrap();
        producer.push(tuple(2)).await.unwrap();
        assert_eq!(consumer.pop().unwrap().order_id, 1);
        assert_eq!(consumer.pop().unwrap().order_id, 2);
        assert!(consumer.pop().is_none());
    }

    #[tokio::test]
    async fn pop_never_blocks_when_empty() {
        let (_producer, mut consumer) = StreamBuffer::channel(Some(4));
        assert!(consumer.is_empty());
        assert!(consumer.pop().is_none());
    }

    #[tokio::test]
    async fn size_tracks_pending_items() {
        let (producer, mut consumer) = StreamBuffer::channel(Some(4));
        producer.push(tuple(1)).await.unwrap();
        producer.push(tuple(2)).await.unwrap();
        assert_eq!(consumer.size(), 2);
        consumer.pop();
        assert_eq!(consumer.size(), 1);
    }
}
