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

//! Warehouse Sink adapters (spec.md §6). The core only ever sees the
//! `WarehouseSink` trait from `hybridjoin_core`; these are the concrete,
//! swappable bindings. The repository's real binding is a relational
//! star-schema store, which is out of the core's scope (spec.md §1) — the
//! CSV sink here is the runnable stand-in for it, and `InMemorySink` backs
//! the in-process tests.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use hybridjoin_core::{EnrichedFact, WarehouseSink};

/// Appends enriched facts to a CSV file, one row per accepted fact.
/// Idempotent only in the "at-least-once, duplicates allowed" sense
/// spec.md §6 permits: it does not dedupe on `order_id`.
pub struct CsvFactSink {
    path: PathBuf,
    writer: Mutex<csv::Writer<std::fs::File>>,
}

impl CsvFactSink {
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let needs_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record([
                "order_id",
                "customer_id",
                "product_id",
                "date_id",
                "store_id",
                "purchase_amount",
                "quantity",
            ])?;
            writer.flush()?;
        }
        Ok(Self {
            path,
            writer: Mutex::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WarehouseSink for CsvFactSink {
    async fn accept(&self, fact: EnrichedFact) -> anyhow::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_record([
            fact.order_id.to_string(),
            fact.customer_id.to_string(),
            fact.product_id,
            fact.date_id.to_string(),
            fact.store_id.to_string(),
            fact.purchase_amount.to_string(),
            fact.quantity.to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

/// An in-memory sink for tests and local smoke runs: every accepted fact
/// is appended to a `Vec` behind a `parking_lot::Mutex`.
#[derive(Clone, Default)]
pub struct InMemorySink {
    facts: Arc<Mutex<Vec<EnrichedFact>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn facts(&self) -> Vec<EnrichedFact> {
        self.facts.lock().clone()
    }
}

#[async_trait]
impl WarehouseSink for InMemorySink {
    async fn accept(&self, fact: EnrichedFact) -> anyhow::Result<()> {
        self.facts.lock().push(fact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hybridjoin_core::date_id;
    use rust_decimal::Decimal;

    fn fact() -> EnrichedFact {
        EnrichedFact {
            order_id: 100,
            customer_id: 1,
            product_id: "P001".into(),
            date_id: date_id(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
            store_id: 1,
            purchase_amount: Decimal::new(700, 2),
            quantity: 2,
        }
    }

    #[tokio::test]
    async fn csv_sink_writes_header_once_then_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.csv");
        {
            let sink = CsvFactSink::create(&path).unwrap();
            sink.accept(fact()).await.unwrap();
        }
        {
            let sink = CsvFactSink::create(&path).unwrap();
            sink.accept(fact()).await.unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3); // header + 2 rows
        assert!(contents.lines().next().unwrap().starts_with("order_id"));
    }

    #[tokio::test]
    async fn in_memory_sink_accumulates_facts() {
        let sink = InMemorySink::new();
        sink.accept(fact()).await.unwrap();
        sink.accept(fact()).await.unwrap();
        assert_eq!(sink.facts().len(), 2);
    }
}
