// CypherSynth - Schema-driven Cypher training data synthesis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Canonical graph snapshots for CypherSynth tests.
//!
//! This module provides a set of fixtures organized by category:
//!
//! - **graphs**: Complete snapshots with discovery output and instances
//! - **tasks**: Generation configs exercising every task kind
//! - **errors**: Malformed snapshots and discovery rows
//! - **builders**: Builder pattern for customizable fixtures

pub mod builders;
pub mod errors;
mod graphs;
mod tasks;

pub use graphs::*;
pub use tasks::*;

use crate::FixtureList;

/// Returns all snapshot fixture functions for iteration.
///
/// Useful for running the same test across all fixtures.
pub fn all() -> FixtureList {
    vec![
        ("company", company_graph),
        ("temporal", temporal_graph),
        ("empty", empty_graph),
    ]
}
