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

//! In-memory graph schema built from discovery output.
//!
//! Discovery yields three row collections:
//!
//! | Collection | Row shape |
//! |------------|-----------|
//! | node property groups | `{label, properties: [{property, datatype}]}` |
//! | relationship property groups | `{type, properties: [{property, datatype}]}` |
//! | relationship triples | `{start, type, end}` |
//!
//! [`SchemaModel::from_discovery`] only reshapes these rows; it validates
//! nothing beyond the presence and type of the fields it reads.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, SynthError};
use crate::source::Row;
use crate::value::PropertyValue;

/// A declared property and its datatype tag (e.g. `STRING`, `FLOAT`, `DATE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Property name.
    pub property: String,
    /// Declared datatype.
    pub datatype: String,
}

impl PropertySpec {
    /// Create a property declaration.
    pub fn new(property: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            datatype: datatype.into(),
        }
    }
}

/// A `(start)-[type]->(end)` triple present in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipSpec {
    /// Start node label.
    pub start: String,
    /// Relationship type.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// End node label.
    pub end: String,
}

impl RelationshipSpec {
    /// Create a relationship triple.
    pub fn new(start: impl Into<String>, rel_type: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            rel_type: rel_type.into(),
            end: end.into(),
        }
    }

    /// Render as a Cypher pattern: `(:Start)-[:TYPE]->(:End)`.
    pub fn pattern(&self) -> String {
        format!("(:{})-[:{}]->(:{})", self.start, self.rel_type, self.end)
    }
}

/// Raw schema discovery output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    /// Node property groups.
    #[serde(default)]
    pub node_properties: Vec<Row>,
    /// Relationship property groups.
    #[serde(default)]
    pub relationship_properties: Vec<Row>,
    /// Relationship triples.
    #[serde(default)]
    pub relationships: Vec<Row>,
}

/// Which half of the schema to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Node properties.
    Node,
    /// Relationship properties.
    Relationship,
}

/// Normalized graph schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaModel {
    /// Declared properties per node label.
    pub node_props: BTreeMap<String, Vec<PropertySpec>>,
    /// Declared properties per relationship type.
    pub rel_props: BTreeMap<String, Vec<PropertySpec>>,
    /// Relationship triples, duplicates preserved.
    pub relationships: Vec<RelationshipSpec>,
}

impl SchemaModel {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node label with its properties.
    pub fn with_node(mut self, label: impl Into<String>, props: Vec<PropertySpec>) -> Self {
        self.node_props.insert(label.into(), props);
        self
    }

    /// Declare properties for a relationship type.
    pub fn with_rel_props(mut self, rel_type: impl Into<String>, props: Vec<PropertySpec>) -> Self {
        self.rel_props.insert(rel_type.into(), props);
        self
    }

    /// Add a relationship triple.
    pub fn with_relationship(mut self, spec: RelationshipSpec) -> Self {
        self.relationships.push(spec);
        self
    }

    /// Build the schema from raw discovery rows.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::DataFormat`] if any row lacks a field it needs.
    /// One malformed row fails the whole build.
    pub fn from_discovery(payload: &DiscoveryPayload) -> Result<Self> {
        let mut node_props = BTreeMap::new();
        for row in &payload.node_properties {
            let label = string_field(row, "label", "node property group")?;
            let props = property_specs(row, "node property group")?;
            node_props.insert(label, props);
        }

        let mut rel_props = BTreeMap::new();
        for row in &payload.relationship_properties {
            let rel_type = string_field(row, "type", "relationship property group")?;
            let props = property_specs(row, "relationship property group")?;
            rel_props.insert(rel_type, props);
        }

        let relationships = payload
            .relationships
            .iter()
            .map(|row| {
                Ok(RelationshipSpec {
                    start: string_field(row, "start", "relationship")?,
                    rel_type: string_field(row, "type", "relationship")?,
                    end: string_field(row, "end", "relationship")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            node_props,
            rel_props,
            relationships,
        })
    }

    /// All node labels.
    pub fn labels(&self) -> Vec<String> {
        self.node_props.keys().cloned().collect()
    }

    /// Declared properties of a node label.
    pub fn node_properties(&self, label: &str) -> Option<&[PropertySpec]> {
        self.node_props.get(label).map(Vec::as_slice)
    }

    /// Declared properties of a relationship type.
    pub fn relationship_properties(&self, rel_type: &str) -> Option<&[PropertySpec]> {
        self.rel_props.get(rel_type).map(Vec::as_slice)
    }

    /// All relationship triples.
    pub fn relationships(&self) -> &[RelationshipSpec] {
        &self.relationships
    }

    /// Relationship triples rendered as `(:Start)-[:TYPE]->(:End)`.
    pub fn formatted_relationships(&self) -> Vec<String> {
        self.relationships.iter().map(RelationshipSpec::pattern).collect()
    }

    /// The first triple whose type is `rel_type`.
    pub fn find_relationship(&self, rel_type: &str) -> Option<&RelationshipSpec> {
        self.relationships.iter().find(|r| r.rel_type == rel_type)
    }

    /// The distinct datatypes declared for one half of the schema.
    pub fn datatypes(&self, component: Component) -> BTreeSet<String> {
        let groups = match component {
            Component::Node => &self.node_props,
            Component::Relationship => &self.rel_props,
        };
        groups
            .values()
            .flatten()
            .map(|spec| spec.datatype.clone())
            .filter(|dt| !dt.is_empty())
            .collect()
    }

    /// Relationship types with their properties of `datatype`, dropping
    /// types that have none.
    pub fn relationship_properties_of_type(&self, datatype: &str) -> Vec<(String, Vec<String>)> {
        self.rel_props
            .iter()
            .filter_map(|(rel_type, props)| {
                let selected: Vec<String> = props
                    .iter()
                    .filter(|p| p.datatype == datatype)
                    .map(|p| p.property.clone())
                    .collect();
                (!selected.is_empty()).then(|| (rel_type.clone(), selected))
            })
            .collect()
    }

    /// Relationship types that declare at least one property of `datatype`.
    pub fn relationships_with_datatype(&self, datatype: &str) -> Vec<String> {
        self.relationship_properties_of_type(datatype)
            .into_iter()
            .map(|(rel_type, _)| rel_type)
            .collect()
    }

    /// Describe the whole schema as text.
    ///
    /// ```text
    /// Node properties are the following:
    /// Company {name, revenue},Person {name}
    /// The relationships are the following:
    /// (:Person)-[:WORKS_AT]->(:Company)
    /// ```
    pub fn describe(&self, include_types: bool) -> String {
        let nodes: Vec<String> = self
            .node_props
            .iter()
            .map(|(label, props)| format!("{} {{{}}}", label, format_specs(props, include_types)))
            .collect();

        [
            "Node properties are the following:".to_string(),
            nodes.join(","),
            "The relationships are the following:".to_string(),
            self.formatted_relationships().join(","),
        ]
        .join("\n")
    }
}

fn format_specs(props: &[PropertySpec], include_types: bool) -> String {
    props
        .iter()
        .map(|p| {
            if include_types {
                format!("{}: {}", p.property, p.datatype)
            } else {
                p.property.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn string_field(row: &Row, field: &str, record: &str) -> Result<String> {
    row.get(field)
        .and_then(PropertyValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| SynthError::data_format(record, field))
}

fn property_specs(row: &Row, record: &str) -> Result<Vec<PropertySpec>> {
    let items = row
        .get("properties")
        .and_then(PropertyValue::as_list)
        .ok_or_else(|| SynthError::data_format(record, "properties"))?;

    items
        .iter()
        .map(|item| {
            let map = item
                .as_map()
                .ok_or_else(|| SynthError::data_format(record, "properties"))?;
            Ok(PropertySpec {
                property: string_field(map, "property", record)?,
                datatype: string_field(map, "datatype", record)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entries: Vec<(&str, PropertyValue)>) -> Row {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn spec_value(property: &str, datatype: &str) -> PropertyValue {
        PropertyValue::Map(row(vec![
            ("property", property.into()),
            ("datatype", datatype.into()),
        ]))
    }

    fn payload() -> DiscoveryPayload {
        DiscoveryPayload {
            node_properties: vec![
                row(vec![
                    ("label", "Person".into()),
                    ("properties", PropertyValue::List(vec![spec_value("name", "STRING")])),
                ]),
                row(vec![
                    ("label", "Company".into()),
                    (
                        "properties",
                        PropertyValue::List(vec![
                            spec_value("name", "STRING"),
                            spec_value("revenue", "FLOAT"),
                        ]),
                    ),
                ]),
            ],
            relationship_properties: vec![row(vec![
                ("type", "WORKS_AT".into()),
                ("properties", PropertyValue::List(vec![spec_value("since", "DATE")])),
            ])],
            relationships: vec![
                row(vec![
                    ("start", "Person".into()),
                    ("type", "WORKS_AT".into()),
                    ("end", "Company".into()),
                ]),
                row(vec![
                    ("start", "Person".into()),
                    ("type", "WORKS_AT".into()),
                    ("end", "Company".into()),
                ]),
            ],
        }
    }

    #[test]
    fn test_from_discovery() {
        let schema = SchemaModel::from_discovery(&payload()).unwrap();
        assert_eq!(schema.node_props.len(), 2);
        assert_eq!(schema.rel_props.len(), 1);
        assert_eq!(
            schema.node_properties("Company").unwrap()[1],
            PropertySpec::new("revenue", "FLOAT")
        );
    }

    #[test]
    fn test_from_discovery_keeps_duplicate_triples() {
        let schema = SchemaModel::from_discovery(&payload()).unwrap();
        assert_eq!(schema.relationships().len(), 2);
    }

    #[test]
    fn test_from_discovery_missing_label_aborts() {
        let mut p = payload();
        p.node_properties.push(row(vec![("properties", PropertyValue::List(vec![]))]));
        let err = SchemaModel::from_discovery(&p).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DataFormat { ref record, ref field }
                if record == "node property group" && field == "label"
        ));
    }

    #[test]
    fn test_from_discovery_missing_datatype_aborts() {
        let mut p = payload();
        p.relationship_properties[0].insert(
            "properties".to_string(),
            PropertyValue::List(vec![PropertyValue::Map(row(vec![("property", "x".into())]))]),
        );
        assert!(SchemaModel::from_discovery(&p).is_err());
    }

    #[test]
    fn test_from_discovery_empty_payload() {
        let schema = SchemaModel::from_discovery(&DiscoveryPayload::default()).unwrap();
        assert!(schema.labels().is_empty());
        assert!(schema.relationships().is_empty());
    }

    #[test]
    fn test_datatypes() {
        let schema = SchemaModel::from_discovery(&payload()).unwrap();
        let node_types: Vec<String> = schema.datatypes(Component::Node).into_iter().collect();
        assert_eq!(node_types, vec!["FLOAT".to_string(), "STRING".to_string()]);
        assert!(schema.datatypes(Component::Relationship).contains("DATE"));
    }

    #[test]
    fn test_relationship_properties_of_type() {
        let schema = SchemaModel::from_discovery(&payload()).unwrap();
        assert_eq!(
            schema.relationship_properties_of_type("DATE"),
            vec![("WORKS_AT".to_string(), vec!["since".to_string()])]
        );
        assert!(schema.relationship_properties_of_type("STRING").is_empty());
        assert_eq!(schema.relationships_with_datatype("DATE"), vec!["WORKS_AT"]);
    }

    #[test]
    fn test_formatted_relationships() {
        let schema = SchemaModel::new()
            .with_relationship(RelationshipSpec::new("Person", "KNOWS", "Person"));
        assert_eq!(
            schema.formatted_relationships(),
            vec!["(:Person)-[:KNOWS]->(:Person)".to_string()]
        );
    }

    #[test]
    fn test_describe() {
        let schema = SchemaModel::from_discovery(&payload()).unwrap();
        let text = schema.describe(false);
        assert!(text.starts_with("Node properties are the following:\n"));
        assert!(text.contains("Company {name, revenue},Person {name}"));
        assert!(text.ends_with("(:Person)-[:WORKS_AT]->(:Company),(:Person)-[:WORKS_AT]->(:Company)"));

        let typed = schema.describe(true);
        assert!(typed.contains("Company {name: STRING, revenue: FLOAT}"));
    }

    #[test]
    fn test_relationship_spec_serde_uses_type_key() {
        let spec = RelationshipSpec::new("A", "REL", "B");
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"start":"A","type":"REL","end":"B"}"#);
    }

    #[test]
    fn test_orphaned_rel_props_are_kept() {
        let schema = SchemaModel::new().with_rel_props("ORPHAN", vec![PropertySpec::new("w", "INTEGER")]);
        assert!(schema.find_relationship("ORPHAN").is_none());
        assert_eq!(schema.relationship_properties("ORPHAN").unwrap().len(), 1);
    }
}
