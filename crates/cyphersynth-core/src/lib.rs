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

//! Schema-driven synthesis of Cypher training data from a property graph.
//!
//! This crate provides functionality to:
//! - Build an in-memory schema model from graph discovery output
//! - Extract bounded samples of node and relationship instances
//! - Filter and project those instances by declared datatype
//! - Expand them into `{Prompt, Question, Schema, Cypher}` training records
//! - Render minimal subschemas scoped to the entities a record references
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Schema discovery | [`schema`], [`extract::build_schema`] |
//! | Instance extraction | [`extract`], [`source`] |
//! | Temporal normalization | [`temporal`] |
//! | Datatype filtering | [`filter`] |
//! | Sample building | [`sampler`] |
//! | Subschema rendering | [`subschema`] |
//! | Record formatting | [`prompt`], [`dataset`] |
//!
//! # Example
//!
//! ```rust
//! use cyphersynth_core::{
//!     parse_node_instances_of_type, build_node_sampler, NodeInstance, NodeSample,
//!     PropertySpec, SchemaModel,
//! };
//!
//! let schema = SchemaModel::new()
//!     .with_node("Person", vec![PropertySpec::new("name", "STRING")]);
//! let instances = vec![vec![
//!     NodeInstance::new("Person").with_property("name", "Ann"),
//!     NodeInstance::new("Person").with_property("name", "Bo"),
//! ]];
//!
//! let tuples = parse_node_instances_of_type(&schema, &instances, &["Person"], "STRING", true)
//!     .into_flat();
//! let questions = build_node_sampler(
//!     &tuples,
//!     &|s: &NodeSample| format!("Which {} has {} {}?", s.label, s.property, s.value),
//!     true,
//! );
//! assert_eq!(questions[1], "Which Person has name Bo?");
//! ```
//!
//! # Example: Offline generation
//!
//! ```rust
//! use cyphersynth_core::{run_task, Extraction, ExtractionConfig, SamplingConfig, SnapshotSource};
//! use cyphersynth_core::{PromptTemplate, Task, TaskKind};
//!
//! fn example(snapshot: &SnapshotSource) -> cyphersynth_core::Result<()> {
//!     let extraction = Extraction::run(snapshot, &ExtractionConfig::default())?;
//!     let task = Task::new(
//!         "labels",
//!         TaskKind::LabelPair,
//!         PromptTemplate::new(
//!             "Generate Cypher for the question.",
//!             "How many {first_label} nodes are linked to a {second_label}?",
//!             "MATCH (:{first_label})--(b:{second_label}) RETURN count(b)",
//!         ),
//!     );
//!     let records = run_task(&extraction, &task, &SamplingConfig::default())?;
//!     println!("{}", serde_json::to_string_pretty(&records)?);
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod cypher;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod filter;
pub mod instance;
pub mod prompt;
pub mod sampler;
pub mod schema;
pub mod source;
pub mod subschema;
pub mod temporal;
pub mod value;

// Re-export main types at crate root for convenience
pub use config::{
    ExtractionConfig, ExtractionConfigBuilder, GenerationConfig, SamplingConfig,
    SamplingConfigBuilder, SubschemaOptions, DEFAULT_NODE_LIMIT, DEFAULT_RELATIONSHIP_LIMIT,
    DEFAULT_SAMPLE_MAX,
};
pub use cypher::CypherStatement;
pub use dataset::{generate, generate_with_rng, run_task, run_task_with_rng, Task, TaskKind};
pub use error::{Result, SynthError};
pub use extract::{
    build_schema, extract_multiple_relationship_instances, extract_node_instances,
    extract_relationship_instances, Extraction,
};
pub use filter::{
    filter_relationship_instances, filter_relationship_with_props_instances,
    instances_with_relationship_properties, nodes_with_properties_of_type,
    parse_node_instances_of_type, properties_of_type, LabelProperties, NodeTuple, ParsedNodes,
    RelationshipPropsTuple, RelationshipTuple,
};
pub use instance::{NodeInstance, RelationshipInstance};
pub use prompt::{PromptTemplate, SampleRecord, TemplatePrompter};
pub use sampler::{
    apply_repeat_policy, build_label_pairs_sampler, build_node_pair_sampler, build_node_sampler,
    build_relationship_sampler, build_relationship_with_props_sampler, collect_samples,
    collect_samples_with_rng, dedupe_by_key, pair_properties, LabelPairSample, NodePairSample,
    NodeSample, Prompter, RelationshipPropsSample, RelationshipSample,
};
pub use schema::{Component, DiscoveryPayload, PropertySpec, RelationshipSpec, SchemaModel};
pub use source::{GraphSource, Row, SnapshotRelationship, SnapshotSource};
pub use subschema::{render_subschema, NodeSelector, RelSelector};
pub use temporal::{normalize_node_instances, normalize_properties, normalize_relationship_instances};
pub use value::{PropertyMap, PropertyValue, ZonedDateTime};
