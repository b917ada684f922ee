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

//! Shared test fixtures and utilities for CypherSynth.
//!
//! This crate provides canonical graph snapshots, builders, malformed
//! inputs and generation configs so the core and CLI test suites exercise
//! the same data.
//!
//! # Quick Start
//!
//! ```rust
//! use cyphersynth_test::fixtures;
//!
//! // Pre-built snapshots
//! let graph = fixtures::company_graph();
//! let dated = fixtures::temporal_graph();
//!
//! // Custom snapshots
//! use cyphersynth_test::fixtures::builders::{props, DiscoveryBuilder};
//!
//! let discovery = DiscoveryBuilder::new()
//!     .node("Person", &[("name", "STRING")])
//!     .build();
//! let snapshot = cyphersynth_core::SnapshotSource::new(discovery)
//!     .with_node("Person", props(&[("name", "Ann".into())]));
//! assert_eq!(snapshot.nodes["Person"].len(), 1);
//!
//! // Malformed inputs
//! for (name, json) in fixtures::errors::malformed_snapshots() {
//!     assert!(!name.is_empty() && !json.is_empty());
//! }
//! ```

#![deny(missing_docs)]

use cyphersynth_core::SnapshotSource;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> SnapshotSource)>;

/// Returns all snapshot fixtures as (name, json_text) pairs.
pub fn fixtures_as_json() -> Vec<(&'static str, String)> {
    fixtures::all()
        .into_iter()
        .map(|(name, fixture_fn)| {
            let json = serde_json::to_string_pretty(&fixture_fn())
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
            (name, json)
        })
        .collect()
}

/// Returns the generation config fixture as JSON text.
pub fn generation_config_json() -> String {
    serde_json::to_string_pretty(&fixtures::generation_config())
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Write all fixtures to a directory as .json files.
#[cfg(feature = "generate")]
pub fn write_fixtures_to_dir(dir: &std::path::Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (name, json) in fixtures_as_json() {
        std::fs::write(dir.join(format!("{}.json", name)), json)?;
    }
    std::fs::write(dir.join("generation.json"), generation_config_json())?;
    Ok(())
}

/// Canonical graph snapshots and generation configs.
pub mod fixtures;

// Re-export all fixtures for convenience
pub use fixtures::*;

#[cfg(test)]
mod tests {
    use super::*;
    use cyphersynth_core::{GenerationConfig, GraphSource};

    #[test]
    fn test_every_fixture_serializes() {
        let all = fixtures_as_json();
        assert_eq!(all.len(), fixtures::all().len());
        for (name, json) in all {
            assert!(!json.contains("\"error\""), "{} failed to serialize", name);
            let parsed = SnapshotSource::from_json(&json).unwrap();
            assert!(parsed.discover().is_ok(), "{} lost its discovery payload", name);
        }
    }

    #[test]
    fn test_generation_config_json_parses() {
        let config = GenerationConfig::from_json(&generation_config_json()).unwrap();
        assert_eq!(config, fixtures::generation_config());
    }
}
