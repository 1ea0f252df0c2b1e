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

//! CSV-shaped external collaborators (spec.md §6): the transaction source,
//! the two master-relation loaders, and the warehouse sink adapters. None
//! of this is part of the HYBRIDJOIN core; it is the narrow, swappable
//! boundary the core reaches through.

pub mod sink;
pub mod source;

pub use sink::{CsvFactSink, InMemorySink};
pub use source::{load_customer_master, load_product_master, CsvTransactionSource};
