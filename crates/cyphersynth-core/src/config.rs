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

//! Configuration types for extraction, sampling and subschema rendering.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dataset::Task;
use crate::error::{Result, SynthError};

/// Default number of instances fetched per node label.
pub const DEFAULT_NODE_LIMIT: usize = 10;

/// Default number of instances fetched per relationship triple.
pub const DEFAULT_RELATIONSHIP_LIMIT: usize = 10;

/// Default cap on the records kept per task.
pub const DEFAULT_SAMPLE_MAX: usize = 100;

/// How many instances to pull from the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Instances per node label (default: 10).
    pub node_limit: usize,
    /// Instances per relationship triple (default: 10).
    pub relationship_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            node_limit: DEFAULT_NODE_LIMIT,
            relationship_limit: DEFAULT_RELATIONSHIP_LIMIT,
        }
    }
}

impl ExtractionConfig {
    /// Create a config with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    ///
    /// ```
    /// # use cyphersynth_core::ExtractionConfig;
    /// let config = ExtractionConfig::builder()
    ///     .node_limit(25)
    ///     .relationship_limit(5)
    ///     .build();
    /// assert_eq!(config.node_limit, 25);
    /// ```
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }

    /// Set the per-label node limit.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = limit;
        self
    }

    /// Set the per-triple relationship limit.
    pub fn with_relationship_limit(mut self, limit: usize) -> Self {
        self.relationship_limit = limit;
        self
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug, Default)]
pub struct ExtractionConfigBuilder {
    node_limit: Option<usize>,
    relationship_limit: Option<usize>,
}

impl ExtractionConfigBuilder {
    /// Create a builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-label node limit.
    pub fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Set the per-triple relationship limit.
    pub fn relationship_limit(mut self, limit: usize) -> Self {
        self.relationship_limit = Some(limit);
        self
    }

    /// Build the config, using defaults for unset values.
    pub fn build(self) -> ExtractionConfig {
        let defaults = ExtractionConfig::default();
        ExtractionConfig {
            node_limit: self.node_limit.unwrap_or(defaults.node_limit),
            relationship_limit: self.relationship_limit.unwrap_or(defaults.relationship_limit),
        }
    }
}

/// Repeat control and down-sampling for the sample builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Keep tuples that repeat an already-seen key (default: false).
    pub allow_repeats: bool,
    /// Maximum records kept per task (default: 100).
    pub sample_max: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            allow_repeats: false,
            sample_max: DEFAULT_SAMPLE_MAX,
        }
    }
}

impl SamplingConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Keep repeated keys.
    pub fn with_repeats(mut self) -> Self {
        self.allow_repeats = true;
        self
    }

    /// Set the per-task record cap.
    pub fn with_sample_max(mut self, max: usize) -> Self {
        self.sample_max = max;
        self
    }
}

/// Builder for [`SamplingConfig`].
#[derive(Debug, Default)]
pub struct SamplingConfigBuilder {
    allow_repeats: Option<bool>,
    sample_max: Option<usize>,
}

impl SamplingConfigBuilder {
    /// Create a builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether repeated keys are kept.
    pub fn allow_repeats(mut self, allow: bool) -> Self {
        self.allow_repeats = Some(allow);
        self
    }

    /// Set the per-task record cap.
    pub fn sample_max(mut self, max: usize) -> Self {
        self.sample_max = Some(max);
        self
    }

    /// Build the config, using defaults for unset values.
    pub fn build(self) -> SamplingConfig {
        let defaults = SamplingConfig::default();
        SamplingConfig {
            allow_repeats: self.allow_repeats.unwrap_or(defaults.allow_repeats),
            sample_max: self.sample_max.unwrap_or(defaults.sample_max),
        }
    }
}

/// What a rendered subschema includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubschemaOptions {
    /// List the selected node properties (default: true).
    pub include_node_props: bool,
    /// Add a relationship properties section (default: false).
    pub include_rel_props: bool,
    /// Show datatypes next to property names (default: false).
    pub include_types: bool,
}

impl Default for SubschemaOptions {
    fn default() -> Self {
        Self {
            include_node_props: true,
            include_rel_props: false,
            include_types: false,
        }
    }
}

impl SubschemaOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render node labels without properties.
    pub fn without_node_props(mut self) -> Self {
        self.include_node_props = false;
        self
    }

    /// Add the relationship properties section.
    pub fn with_rel_props(mut self) -> Self {
        self.include_rel_props = true;
        self
    }

    /// Show datatypes.
    pub fn with_types(mut self) -> Self {
        self.include_types = true;
        self
    }
}

/// A complete generation run: extraction limits, sampling policy and the
/// tasks to generate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Extraction limits.
    pub extraction: ExtractionConfig,
    /// Sampling policy shared by every task.
    pub sampling: SamplingConfig,
    /// Tasks, run in order.
    pub tasks: Vec<Task>,
}

impl GenerationConfig {
    /// Parse a generation config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a generation config from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SynthError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Add a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}
