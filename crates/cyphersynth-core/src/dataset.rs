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

//! Generation tasks: filter, build samples, format, down-sample.
//!
//! A task is described in JSON as
//!
//! ```json
//! {
//!   "name": "person_by_name",
//!   "kind": "node",
//!   "datatype": "STRING",
//!   "template": {"prompt": "...", "question": "...", "cypher": "..."},
//!   "subschema": {"include_types": true}
//! }
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{GenerationConfig, SamplingConfig, SubschemaOptions};
use crate::error::Result;
use crate::extract::Extraction;
use crate::filter::{
    filter_relationship_instances, filter_relationship_with_props_instances,
    instances_with_relationship_properties, parse_node_instances_of_type,
};
use crate::prompt::{PromptTemplate, SampleRecord, TemplatePrompter};
use crate::sampler::{
    build_label_pairs_sampler, build_node_pair_sampler, build_node_sampler,
    build_relationship_sampler, build_relationship_with_props_sampler, collect_samples_with_rng,
};

/// The sample shape a task generates, with the datatypes it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// One property of one label.
    Node {
        /// Property datatype.
        datatype: String,
    },
    /// Two properties, on one label or on two.
    NodePair {
        /// Datatype of the first property.
        first_datatype: String,
        /// Datatype of the second property.
        second_datatype: String,
        /// Restrict pairs to a shared label.
        #[serde(default)]
        same_label: bool,
    },
    /// Two labels.
    LabelPair,
    /// A start and an end property around a relationship.
    Relationship {
        /// Start property datatype.
        start_datatype: String,
        /// End property datatype.
        end_datatype: String,
    },
    /// Start, relationship and end properties.
    RelationshipWithProps {
        /// Start property datatype.
        start_datatype: String,
        /// Relationship property datatype.
        rel_datatype: String,
        /// End property datatype.
        end_datatype: String,
    },
}

/// One named generation job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task name, used in logs.
    pub name: String,
    /// What to generate.
    #[serde(flatten)]
    pub kind: TaskKind,
    /// Record texts.
    pub template: PromptTemplate,
    /// Subschema options for the `Schema` field.
    #[serde(default)]
    pub subschema: SubschemaOptions,
}

impl Task {
    /// Create a task with default subschema options.
    pub fn new(name: impl Into<String>, kind: TaskKind, template: PromptTemplate) -> Self {
        Self {
            name: name.into(),
            kind,
            template,
            subschema: SubschemaOptions::default(),
        }
    }

    /// Set the subschema options.
    pub fn with_subschema(mut self, options: SubschemaOptions) -> Self {
        self.subschema = options;
        self
    }
}

/// Run one task against an extraction.
pub fn run_task(extraction: &Extraction, task: &Task, sampling: &SamplingConfig) -> Result<Vec<SampleRecord>> {
    run_task_with_rng(extraction, task, sampling, &mut rand::thread_rng())
}

/// [`run_task`] with an explicit random source for down-sampling.
pub fn run_task_with_rng<R: Rng + ?Sized>(
    extraction: &Extraction,
    task: &Task,
    sampling: &SamplingConfig,
    rng: &mut R,
) -> Result<Vec<SampleRecord>> {
    let schema = &extraction.schema;
    let prompter = TemplatePrompter::new(schema, &task.template).with_options(task.subschema);
    let labels = schema.labels();
    let repeats = sampling.allow_repeats;

    let records = match &task.kind {
        TaskKind::Node { datatype } => {
            let tuples =
                parse_node_instances_of_type(schema, &extraction.nodes, &labels, datatype, true).into_flat();
            build_node_sampler(&tuples, &prompter, repeats)
        }
        TaskKind::NodePair {
            first_datatype,
            second_datatype,
            same_label,
        } => {
            let first = parse_node_instances_of_type(schema, &extraction.nodes, &labels, first_datatype, true)
                .into_flat();
            let second = parse_node_instances_of_type(schema, &extraction.nodes, &labels, second_datatype, true)
                .into_flat();
            build_node_pair_sampler(&first, &second, &prompter, *same_label, repeats)
        }
        TaskKind::LabelPair => build_label_pairs_sampler(&labels, &prompter, repeats),
        TaskKind::Relationship {
            start_datatype,
            end_datatype,
        } => {
            let tuples =
                filter_relationship_instances(schema, &extraction.relationships, start_datatype, end_datatype);
            build_relationship_sampler(&tuples, &prompter, repeats)
        }
        TaskKind::RelationshipWithProps {
            start_datatype,
            rel_datatype,
            end_datatype,
        } => {
            let with_props = instances_with_relationship_properties(&extraction.relationships);
            let tuples = filter_relationship_with_props_instances(
                schema,
                &with_props,
                start_datatype,
                rel_datatype,
                end_datatype,
            );
            build_relationship_with_props_sampler(&tuples, &prompter, repeats)
        }
    };

    let records = records.into_iter().collect::<Result<Vec<_>>>()?;
    let candidates = records.len();
    let kept = collect_samples_with_rng(records, sampling.sample_max, rng);
    info!(task = %task.name, candidates, kept = kept.len(), "task complete");
    Ok(kept)
}

/// Run every task of a generation config in order and concatenate the
/// records.
pub fn generate(extraction: &Extraction, config: &GenerationConfig) -> Result<Vec<SampleRecord>> {
    generate_with_rng(extraction, config, &mut rand::thread_rng())
}

/// [`generate`] with one random source shared by every task.
pub fn generate_with_rng<R: Rng + ?Sized>(
    extraction: &Extraction,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<SampleRecord>> {
    let mut records = Vec::new();
    for task in &config.tasks {
        records.extend(run_task_with_rng(extraction, task, &config.sampling, rng)?);
    }
    info!(tasks = config.tasks.len(), records = records.len(), "generation complete");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{NodeInstance, RelationshipInstance};
    use crate::schema::{PropertySpec, RelationshipSpec, SchemaModel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn extraction() -> Extraction {
        let schema = SchemaModel::new()
            .with_node("Person", vec![PropertySpec::new("name", "STRING"), PropertySpec::new("age", "INTEGER")])
            .with_node("Company", vec![PropertySpec::new("name", "STRING")])
            .with_rel_props("WORKS_AT", vec![PropertySpec::new("since", "INTEGER")])
            .with_relationship(RelationshipSpec::new("Person", "WORKS_AT", "Company"));

        Extraction {
            schema,
            nodes: vec![
                vec![
                    NodeInstance::new("Company").with_property("name", "Acme"),
                ],
                vec![
                    NodeInstance::new("Person").with_property("name", "Ann").with_property("age", 31i64),
                    NodeInstance::new("Person").with_property("name", "Bo").with_property("age", 0i64),
                ],
            ],
            relationships: vec![vec![
                RelationshipInstance::new("Person", "WORKS_AT", "Company")
                    .with_start_property("name", "Ann")
                    .with_rel_property("since", 2019i64)
                    .with_end_property("name", "Acme"),
                RelationshipInstance::new("Person", "WORKS_AT", "Company")
                    .with_start_property("name", "Bo")
                    .with_end_property("name", "Acme"),
            ]],
        }
    }

    fn template() -> PromptTemplate {
        PromptTemplate::new("Write Cypher.", "question", "cypher")
    }

    #[test]
    fn test_node_task_dedupes_by_label_and_property() {
        let task = Task::new("node", TaskKind::Node { datatype: "STRING".to_string() }, template());
        let records = run_task(&extraction(), &task, &SamplingConfig::default()).unwrap();
        assert_eq!(records.len(), 2);

        let repeats = SamplingConfig::default().with_repeats();
        assert_eq!(run_task(&extraction(), &task, &repeats).unwrap().len(), 3);
    }

    #[test]
    fn test_label_pair_task() {
        let task = Task::new("pairs", TaskKind::LabelPair, template());
        let records = run_task(&extraction(), &task, &SamplingConfig::default()).unwrap();
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_node_pair_task_same_label() {
        let task = Task::new(
            "pair",
            TaskKind::NodePair {
                first_datatype: "STRING".to_string(),
                second_datatype: "INTEGER".to_string(),
                same_label: true,
            },
            PromptTemplate::new("", "{label} {first_value} {second_value}", ""),
        );
        let records = run_task(&extraction(), &task, &SamplingConfig::default().with_repeats()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "Person Ann 31");
    }

    #[test]
    fn test_relationship_tasks() {
        let rel = Task::new(
            "rel",
            TaskKind::Relationship {
                start_datatype: "STRING".to_string(),
                end_datatype: "STRING".to_string(),
            },
            PromptTemplate::new("", "{start_value} works at {end_value}", ""),
        );
        let records = run_task(&extraction(), &rel, &SamplingConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Ann works at Acme");
        assert!(records[0].schema.contains("{'start': Person, 'type': WORKS_AT, 'end': Company}"));

        let with_props = Task::new(
            "rel_props",
            TaskKind::RelationshipWithProps {
                start_datatype: "STRING".to_string(),
                rel_datatype: "INTEGER".to_string(),
                end_datatype: "STRING".to_string(),
            },
            PromptTemplate::new("", "{rel_value}", ""),
        );
        let records = run_task(&extraction(), &with_props, &SamplingConfig::default().with_repeats()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "2019");
    }

    #[test]
    fn test_task_down_samples() {
        let task = Task::new("pairs", TaskKind::LabelPair, template());
        let sampling = SamplingConfig::default().with_sample_max(3);
        let mut rng = StdRng::seed_from_u64(1);
        let records = run_task_with_rng(&extraction(), &task, &sampling, &mut rng).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_template_error_fails_task() {
        let task = Task::new(
            "broken",
            TaskKind::LabelPair,
            PromptTemplate::new("", "{nope}", ""),
        );
        assert!(run_task(&extraction(), &task, &SamplingConfig::default()).is_err());
    }

    #[test]
    fn test_task_json_shape() {
        let json = r#"{
            "name": "people",
            "kind": "node_pair",
            "first_datatype": "STRING",
            "second_datatype": "INTEGER",
            "template": {"question": "q", "cypher": "c"},
            "subschema": {"include_types": true}
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.kind,
            TaskKind::NodePair {
                first_datatype: "STRING".to_string(),
                second_datatype: "INTEGER".to_string(),
                same_label: false,
            }
        );
        assert!(task.subschema.include_types);
        assert!(task.subschema.include_node_props);
        assert_eq!(task.template.prompt, "");
    }

    #[test]
    fn test_generate_concatenates_tasks() {
        let config = GenerationConfig::default()
            .with_task(Task::new("pairs", TaskKind::LabelPair, template()))
            .with_task(Task::new("node", TaskKind::Node { datatype: "INTEGER".to_string() }, template()));
        let records = generate(&extraction(), &config).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_generate_with_seed_is_reproducible() {
        let config = GenerationConfig {
            sampling: SamplingConfig::default().with_repeats().with_sample_max(2),
            ..GenerationConfig::default()
        }
        .with_task(Task::new("pairs", TaskKind::LabelPair, template()))
        .with_task(Task::new("node", TaskKind::Node { datatype: "STRING".to_string() }, template()));

        let first = generate_with_rng(&extraction(), &config, &mut StdRng::seed_from_u64(11)).unwrap();
        let second = generate_with_rng(&extraction(), &config, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }
}
