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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HybridJoinError>;

/// Error taxonomy for the pipeline (spec.md §7).
///
/// Only the classes that are actually allowed to abort the process
/// (init failure, invariant violation) are represented here. Parse
/// failures, master misses and sink dead-letters are control-flow
/// outcomes recorded via [`crate::PipelineCounters`], not `Err` values,
/// per §7's propagation rule: the worker never aborts on classes 2-4.
#[derive(Error, Debug)]
pub enum HybridJoinError {
    #[error("initialization failed: {0}")]
    Init(#[from] anyhow::Error),

    #[error("invariant violated: {0}")]
    Invariant(String),
}
