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

//! Configures the HybridJoin binary's logging.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Logging knobs exposed to the hosting binary.
pub struct LoggerSettings {
    /// Emit one JSON object per log line instead of the human-readable format.
    json: bool,
    /// Default level when `RUST_LOG` is unset.
    default_level: LevelFilter,
}

impl LoggerSettings {
    pub fn new() -> Self {
        Self {
            json: false,
            default_level: LevelFilter::INFO,
        }
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs the global `tracing` subscriber. Must be called once, as early
/// as possible in `main`, before any worker/feeder task is spawned.
pub fn init_logger(settings: LoggerSettings) {
    let filter = EnvFilter::builder()
        .with_default_directive(settings.default_level.into())
        .from_env_lossy();

    if settings.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
