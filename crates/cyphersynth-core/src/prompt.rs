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

//! Template-driven prompter producing `{Prompt, Question, Schema, Cypher}`
//! records.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` stand for literal
//! braces. The placeholders available depend on the sample shape:
//!
//! | Sample | Placeholders |
//! |--------|--------------|
//! | node | `label`, `property`, `value` |
//! | node pair | `label` (same label only), `first_label`, `first_property`, `first_value`, `second_label`, `second_property`, `second_value` |
//! | label pair | `first_label`, `second_label` |
//! | relationship | `start_label`, `start_property`, `start_value`, `rel_type`, `end_label`, `end_property`, `end_value` |
//! | relationship with props | as relationship, plus `rel_property`, `rel_value` |
//!
//! Every placeholder except `schema` has a `_cypher` twin for use in the
//! Cypher template: values become literals (strings quoted and escaped),
//! labels, types and property names are backtick-quoted when they are not
//! plain identifiers. `{schema}` expands to the
//! subschema of the labels, types and properties the sample references.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SubschemaOptions;
use crate::cypher::escape::escape_identifier;
use crate::error::{Result, SynthError};
use crate::sampler::{
    LabelPairSample, NodePairSample, NodeSample, Prompter, RelationshipPropsSample,
    RelationshipSample,
};
use crate::schema::SchemaModel;
use crate::subschema::{render_subschema, NodeSelector, RelSelector};
use crate::value::PropertyValue;

/// One training record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SampleRecord {
    /// Instruction text.
    pub prompt: String,
    /// Natural-language question.
    pub question: String,
    /// Subschema the question refers to.
    pub schema: String,
    /// Expected Cypher answer.
    pub cypher: String,
}

/// The three texts a record is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Instruction template.
    #[serde(default)]
    pub prompt: String,
    /// Question template.
    pub question: String,
    /// Cypher template.
    pub cypher: String,
}

impl PromptTemplate {
    /// Create a template.
    pub fn new(
        prompt: impl Into<String>,
        question: impl Into<String>,
        cypher: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            question: question.into(),
            cypher: cypher.into(),
        }
    }
}

/// Placeholder values for one sample.
type Vars = BTreeMap<&'static str, String>;

/// Expand `{name}` placeholders in `template`.
///
/// ```
/// # use std::collections::BTreeMap;
/// # use cyphersynth_core::prompt::substitute;
/// let mut vars = BTreeMap::new();
/// vars.insert("label", "Person".to_string());
/// assert_eq!(substitute("MATCH (n:{label}) RETURN {{}}", &vars).unwrap(), "MATCH (n:Person) RETURN {}");
/// ```
pub fn substitute(template: &str, vars: &BTreeMap<&str, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(SynthError::Template(format!(
                                "unclosed placeholder '{{{}' in \"{}\"",
                                name, template
                            )))
                        }
                    }
                }
                let value = vars.get(name.as_str()).ok_or_else(|| {
                    SynthError::Template(format!("unknown placeholder '{{{}}}'", name))
                })?;
                out.push_str(value);
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

fn insert_name(vars: &mut Vars, name: &'static str, cypher_name: &'static str, text: &str) {
    vars.insert(name, text.to_string());
    vars.insert(cypher_name, escape_identifier(text));
}

fn insert_value(vars: &mut Vars, name: &'static str, cypher_name: &'static str, value: &PropertyValue) {
    vars.insert(name, value.to_string());
    vars.insert(cypher_name, value.to_cypher_literal());
}

/// A [`Prompter`] for every sample shape, rendering a [`PromptTemplate`]
/// against one schema.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePrompter<'a> {
    /// Schema used for subschema rendering.
    pub schema: &'a SchemaModel,
    /// Texts to render.
    pub template: &'a PromptTemplate,
    /// Subschema rendering options.
    pub options: SubschemaOptions,
}

impl<'a> TemplatePrompter<'a> {
    /// Create a prompter with default subschema options.
    pub fn new(schema: &'a SchemaModel, template: &'a PromptTemplate) -> Self {
        Self {
            schema,
            template,
            options: SubschemaOptions::default(),
        }
    }

    /// Set the subschema options.
    pub fn with_options(mut self, options: SubschemaOptions) -> Self {
        self.options = options;
        self
    }

    fn render(&self, mut vars: Vars, nodes: &[NodeSelector], rels: &[RelSelector]) -> Result<SampleRecord> {
        let schema = render_subschema(self.schema, nodes, rels, self.options)?;
        vars.insert("schema", schema.clone());
        Ok(SampleRecord {
            prompt: substitute(&self.template.prompt, &vars)?,
            question: substitute(&self.template.question, &vars)?,
            schema,
            cypher: substitute(&self.template.cypher, &vars)?,
        })
    }
}

impl Prompter<NodeSample> for TemplatePrompter<'_> {
    type Record = Result<SampleRecord>;

    fn format(&self, s: &NodeSample) -> Self::Record {
        let mut vars = Vars::new();
        insert_name(&mut vars, "label", "label_cypher", &s.label);
        insert_name(&mut vars, "property", "property_cypher", &s.property);
        insert_value(&mut vars, "value", "value_cypher", &s.value);

        self.render(vars, &[NodeSelector::property(&s.label, &s.property)], &[])
    }
}

impl Prompter<NodePairSample> for TemplatePrompter<'_> {
    type Record = Result<SampleRecord>;

    fn format(&self, s: &NodePairSample) -> Self::Record {
        let mut vars = Vars::new();
        let (first_property, first_value, second_property, second_value) = match s {
            NodePairSample::SameLabel {
                label,
                first_property,
                first_value,
                second_property,
                second_value,
            } => {
                insert_name(&mut vars, "label", "label_cypher", label);
                (first_property, first_value, second_property, second_value)
            }
            NodePairSample::DistinctLabels {
                first_property,
                first_value,
                second_property,
                second_value,
                ..
            } => (first_property, first_value, second_property, second_value),
        };
        insert_name(&mut vars, "first_label", "first_label_cypher", s.first_label());
        insert_name(&mut vars, "first_property", "first_property_cypher", first_property);
        insert_value(&mut vars, "first_value", "first_value_cypher", first_value);
        insert_name(&mut vars, "second_label", "second_label_cypher", s.second_label());
        insert_name(&mut vars, "second_property", "second_property_cypher", second_property);
        insert_value(&mut vars, "second_value", "second_value_cypher", second_value);

        let nodes = [
            NodeSelector::property(s.first_label(), first_property),
            NodeSelector::property(s.second_label(), second_property),
        ];
        self.render(vars, &nodes, &[])
    }
}

impl Prompter<LabelPairSample> for TemplatePrompter<'_> {
    type Record = Result<SampleRecord>;

    fn format(&self, s: &LabelPairSample) -> Self::Record {
        let mut vars = Vars::new();
        insert_name(&mut vars, "first_label", "first_label_cypher", &s.first);
        insert_name(&mut vars, "second_label", "second_label_cypher", &s.second);

        let nodes = [NodeSelector::label(&s.first), NodeSelector::label(&s.second)];
        self.render(vars, &nodes, &[])
    }
}

impl Prompter<RelationshipSample> for TemplatePrompter<'_> {
    type Record = Result<SampleRecord>;

    fn format(&self, s: &RelationshipSample) -> Self::Record {
        let mut vars = Vars::new();
        insert_name(&mut vars, "start_label", "start_label_cypher", &s.start_label);
        insert_name(&mut vars, "start_property", "start_property_cypher", &s.start_property);
        insert_value(&mut vars, "start_value", "start_value_cypher", &s.start_value);
        insert_name(&mut vars, "rel_type", "rel_type_cypher", &s.rel_type);
        insert_name(&mut vars, "end_label", "end_label_cypher", &s.end_label);
        insert_name(&mut vars, "end_property", "end_property_cypher", &s.end_property);
        insert_value(&mut vars, "end_value", "end_value_cypher", &s.end_value);

        let nodes = [
            NodeSelector::property(&s.start_label, &s.start_property),
            NodeSelector::property(&s.end_label, &s.end_property),
        ];
        self.render(vars, &nodes, &[RelSelector::rel_type(&s.rel_type)])
    }
}

impl Prompter<RelationshipPropsSample> for TemplatePrompter<'_> {
    type Record = Result<SampleRecord>;

    fn format(&self, s: &RelationshipPropsSample) -> Self::Record {
        let mut vars = Vars::new();
        insert_name(&mut vars, "start_label", "start_label_cypher", &s.start_label);
        insert_name(&mut vars, "start_property", "start_property_cypher", &s.start_property);
        insert_value(&mut vars, "start_value", "start_value_cypher", &s.start_value);
        insert_name(&mut vars, "rel_type", "rel_type_cypher", &s.rel_type);
        insert_name(&mut vars, "rel_property", "rel_property_cypher", &s.rel_property);
        insert_value(&mut vars, "rel_value", "rel_value_cypher", &s.rel_value);
        insert_name(&mut vars, "end_label", "end_label_cypher", &s.end_label);
        insert_name(&mut vars, "end_property", "end_property_cypher", &s.end_property);
        insert_value(&mut vars, "end_value", "end_value_cypher", &s.end_value);

        let nodes = [
            NodeSelector::property(&s.start_label, &s.start_property),
            NodeSelector::property(&s.end_label, &s.end_property),
        ];
        self.render(vars, &nodes, &[RelSelector::property(&s.rel_type, &s.rel_property)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PropertySpec, RelationshipSpec};

    fn schema() -> SchemaModel {
        SchemaModel::new()
            .with_node("Person", vec![PropertySpec::new("name", "STRING")])
            .with_node("Company", vec![PropertySpec::new("name", "STRING")])
            .with_rel_props("WORKS_AT", vec![PropertySpec::new("since", "INTEGER")])
            .with_relationship(RelationshipSpec::new("Person", "WORKS_AT", "Company"))
    }

    fn vars(entries: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_substitute_braces_and_placeholders() {
        let v = vars(&[("label", "Person"), ("property", "name")]);
        assert_eq!(
            substitute("MATCH (n:{label} {{{property}: 1}})", &v).unwrap(),
            "MATCH (n:Person {name: 1})"
        );
    }

    #[test]
    fn test_substitute_errors() {
        let v = vars(&[]);
        assert!(matches!(substitute("{missing}", &v), Err(SynthError::Template(_))));
        assert!(matches!(substitute("open {label", &v), Err(SynthError::Template(_))));
    }

    #[test]
    fn test_node_record() {
        let schema = schema();
        let template = PromptTemplate::new(
            "Convert to Cypher.",
            "Find the {label} whose {property} is {value}.",
            "MATCH (n:{label}) WHERE n.{property} = {value_cypher} RETURN n",
        );
        let prompter = TemplatePrompter::new(&schema, &template).with_options(SubschemaOptions::new().with_types());
        let record = prompter
            .format(&NodeSample {
                label: "Person".to_string(),
                property: "name".to_string(),
                value: "O'Brien".into(),
            })
            .unwrap();

        assert_eq!(record.question, "Find the Person whose name is O'Brien.");
        assert_eq!(record.cypher, "MATCH (n:Person) WHERE n.name = 'O\\'Brien' RETURN n");
        assert!(record.schema.contains("Person {name: STRING}"));
    }

    #[test]
    fn test_names_are_escaped_in_cypher_placeholders() {
        let schema = SchemaModel::new()
            .with_node("Movie Star", vec![PropertySpec::new("full name", "STRING")])
            .with_node("Film", vec![PropertySpec::new("title", "STRING")])
            .with_relationship(RelationshipSpec::new("Movie Star", "ACTED IN", "Film"));
        let template = PromptTemplate::new(
            "",
            "Did {start_value} appear in {end_value} as a {start_label}?",
            "MATCH (a:{start_label_cypher})-[:{rel_type_cypher}]->(b:{end_label_cypher}) \
             WHERE a.{start_property_cypher} = {start_value_cypher} AND b.{end_property_cypher} = {end_value_cypher} \
             RETURN count(*) > 0",
        );
        let record = TemplatePrompter::new(&schema, &template)
            .format(&RelationshipSample {
                start_label: "Movie Star".to_string(),
                start_property: "full name".to_string(),
                start_value: "Ann".into(),
                rel_type: "ACTED IN".to_string(),
                end_label: "Film".to_string(),
                end_property: "title".to_string(),
                end_value: "Heat".into(),
            })
            .unwrap();

        assert_eq!(record.question, "Did Ann appear in Heat as a Movie Star?");
        assert_eq!(
            record.cypher,
            "MATCH (a:`Movie Star`)-[:`ACTED IN`]->(b:Film) \
             WHERE a.`full name` = 'Ann' AND b.title = 'Heat' \
             RETURN count(*) > 0"
        );
    }

    #[test]
    fn test_relationship_props_record() {
        let schema = schema();
        let template = PromptTemplate::new(
            "{schema}",
            "{start_value} -[{rel_property}={rel_value}]-> {end_value}",
            "MATCH (:{start_label})-[r:{rel_type}]->(:{end_label}) WHERE r.{rel_property} = {rel_value_cypher} RETURN r",
        );
        let prompter = TemplatePrompter::new(&schema, &template)
            .with_options(SubschemaOptions::new().with_rel_props());
        let record = prompter
            .format(&RelationshipPropsSample {
                start_label: "Person".to_string(),
                start_property: "name".to_string(),
                start_value: "Ann".into(),
                rel_type: "WORKS_AT".to_string(),
                rel_property: "since".to_string(),
                rel_value: 2020i64.into(),
                end_label: "Company".to_string(),
                end_property: "name".to_string(),
                end_value: "Acme".into(),
            })
            .unwrap();

        assert_eq!(record.question, "Ann -[since=2020]-> Acme");
        assert!(record.cypher.ends_with("r.since = 2020 RETURN r"));
        assert_eq!(record.prompt, record.schema);
        assert!(record.schema.contains("WORKS_AT {since}"));
    }

    #[test]
    fn test_relationship_record_without_triple_fails() {
        let schema = SchemaModel::new().with_node("Person", vec![]);
        let template = PromptTemplate::new("", "q", "c");
        let prompter = TemplatePrompter::new(&schema, &template);
        let result = prompter.format(&RelationshipSample {
            start_label: "Person".to_string(),
            start_property: "name".to_string(),
            start_value: "Ann".into(),
            rel_type: "KNOWS".to_string(),
            end_label: "Person".to_string(),
            end_property: "name".to_string(),
            end_value: "Bo".into(),
        });
        assert!(matches!(result, Err(SynthError::Lookup(_))));
    }

    #[test]
    fn test_same_label_pair_exposes_label() {
        let schema = schema();
        let template = PromptTemplate::new("", "{label}: {first_value} / {second_value}", "");
        let prompter = TemplatePrompter::new(&schema, &template);
        let record = prompter
            .format(&NodePairSample::SameLabel {
                label: "Person".to_string(),
                first_property: "name".to_string(),
                first_value: "Ann".into(),
                second_property: "name".to_string(),
                second_value: "Bo".into(),
            })
            .unwrap();
        assert_eq!(record.question, "Person: Ann / Bo");
    }

    #[test]
    fn test_record_serializes_with_pascal_case_keys() {
        let record = SampleRecord {
            prompt: "p".to_string(),
            question: "q".to_string(),
            schema: "s".to_string(),
            cypher: "c".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Prompt":"p","Question":"q","Schema":"s","Cypher":"c"}"#);
    }
}
