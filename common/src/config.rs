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

use std::time::Duration;

use clap::Args;

fn parse_duration(s: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(s)
}

/// Runtime configuration for the HYBRIDJOIN engine (spec.md §6).
///
/// `#[command(flatten)]`-able so the `hybridjoin-cli` binary can expose
/// every field as a top-level flag while `hybridjoin-core` stays free of
/// any CLI dependency.
#[derive(Args, Debug, Clone)]
pub struct PipelineConfig {
    /// Hash index capacity (`hS`).
    #[arg(long, default_value_t = 10_000)]
    pub hash_index_capacity: usize,

    /// Disk buffer partition size (`vP`).
    #[arg(long, default_value_t = 500)]
    pub partition_size: usize,

    /// Stream buffer bound; unbounded if unset.
    #[arg(long)]
    pub stream_buffer_bound: Option<usize>,

    /// Per-tuple pacing applied by the stream feeder.
    #[arg(long, value_parser = parse_duration, default_value = "0ms")]
    pub feed_interval: Duration,

    /// Drain the stream buffer and hash index before exiting on a stop signal.
    #[arg(long, default_value_t = true)]
    pub drain_on_stop: bool,

    /// How many times a sink write is retried (with exponential backoff)
    /// before the tuple is dead-lettered.
    #[arg(long, default_value_t = 3)]
    pub sink_retry_attempts: usize,

    /// How long the worker yields for when both the stream buffer and the
    /// arrival queue are empty.
    #[arg(long, value_parser = parse_duration, default_value = "5ms")]
    pub idle_yield: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hash_index_capacity: 10_000,
            partition_size: 500,
            stream_buffer_bound: None,
            feed_interval: Duration::from_millis(0),
            drain_on_stop: true,
            sink_retry_attempts: 3,
            idle_yield: Duration::from_millis(5),
        }
    }
}
