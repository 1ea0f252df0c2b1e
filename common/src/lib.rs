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

//! Shared error types, configuration, logging and counters for the
//! HybridJoin pipeline crates.

mod config;
mod error;
mod logging;
mod metrics;

pub use config::PipelineConfig;
pub use error::{HybridJoinError, Result};
pub use logging::{init_logger, LoggerSettings};
pub use metrics::{CountersSnapshot, PipelineCounters};
