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

//! Generation configs for [`company_graph`](super::company_graph).

use cyphersynth_core::{
    ExtractionConfig, GenerationConfig, PromptTemplate, SamplingConfig, SubschemaOptions, Task,
    TaskKind,
};

const PROMPT: &str = "Convert the question to Cypher using this schema:\n{schema}";

/// One task of every kind against the company graph.
pub fn generation_config() -> GenerationConfig {
    GenerationConfig {
        extraction: ExtractionConfig::default(),
        sampling: SamplingConfig::default(),
        tasks: vec![
            Task::new(
                "node_lookup",
                TaskKind::Node {
                    datatype: "STRING".to_string(),
                },
                PromptTemplate::new(
                    PROMPT,
                    "Find the {label} whose {property} is {value}.",
                    "MATCH (n:{label_cypher}) WHERE n.{property_cypher} = {value_cypher} RETURN n",
                ),
            )
            .with_subschema(SubschemaOptions::new().with_types()),
            Task::new(
                "node_pair",
                TaskKind::NodePair {
                    first_datatype: "STRING".to_string(),
                    second_datatype: "INTEGER".to_string(),
                    same_label: true,
                },
                PromptTemplate::new(
                    PROMPT,
                    "Is there a {label} named {first_value} aged {second_value}?",
                    "MATCH (n:{label_cypher} {{{first_property_cypher}: {first_value_cypher}, {second_property_cypher}: {second_value_cypher}}}) RETURN count(n) > 0",
                ),
            ),
            Task::new(
                "label_pair",
                TaskKind::LabelPair,
                PromptTemplate::new(
                    PROMPT,
                    "How are {first_label} and {second_label} nodes connected?",
                    "MATCH (a:{first_label_cypher})-[r]-(b:{second_label_cypher}) RETURN DISTINCT type(r)",
                ),
            )
            .with_subschema(SubschemaOptions::new().without_node_props()),
            Task::new(
                "relationship",
                TaskKind::Relationship {
                    start_datatype: "STRING".to_string(),
                    end_datatype: "STRING".to_string(),
                },
                PromptTemplate::new(
                    PROMPT,
                    "Does {start_value} have a {rel_type} link to {end_value}?",
                    "MATCH (a:{start_label_cypher})-[:{rel_type_cypher}]->(b:{end_label_cypher}) WHERE a.{start_property_cypher} = {start_value_cypher} AND b.{end_property_cypher} = {end_value_cypher} RETURN count(*) > 0",
                ),
            ),
            Task::new(
                "relationship_with_props",
                TaskKind::RelationshipWithProps {
                    start_datatype: "STRING".to_string(),
                    rel_datatype: "INTEGER".to_string(),
                    end_datatype: "STRING".to_string(),
                },
                PromptTemplate::new(
                    PROMPT,
                    "Since when does {start_value} {rel_type} {end_value}?",
                    "MATCH (a:{start_label_cypher})-[r:{rel_type_cypher}]->(b:{end_label_cypher}) WHERE a.{start_property_cypher} = {start_value_cypher} AND b.{end_property_cypher} = {end_value_cypher} RETURN r.{rel_property_cypher}",
                ),
            )
            .with_subschema(SubschemaOptions::new().with_rel_props().with_types()),
        ],
    }
}

/// [`generation_config`] with repeats allowed and a record cap.
pub fn capped_generation_config(sample_max: usize) -> GenerationConfig {
    GenerationConfig {
        sampling: SamplingConfig::builder()
            .allow_repeats(true)
            .sample_max(sample_max)
            .build(),
        ..generation_config()
    }
}
