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

//! Datatype filtering and projection of sampled instances.
//!
//! Datatypes are matched by exact string comparison. Each label's
//! properties are filtered on their own, so two labels sharing a property
//! name never affect each other.

use serde::{Deserialize, Serialize};

use crate::instance::{group_nodes_by_label, NodeInstance, RelationshipInstance};
use crate::schema::{PropertySpec, SchemaModel};
use crate::value::{PropertyMap, PropertyValue};

/// A label and the names of its properties of one datatype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelProperties {
    /// Node label.
    pub label: String,
    /// Matching property names, in declaration order.
    pub properties: Vec<String>,
}

/// One `[label, property, value]` observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTuple {
    /// Node label.
    pub label: String,
    /// Property name.
    pub property: String,
    /// Observed value.
    pub value: PropertyValue,
}

impl NodeTuple {
    /// Create a node tuple.
    pub fn new(label: impl Into<String>, property: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            label: label.into(),
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Node tuples, either flat or grouped per originating instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedNodes {
    /// All tuples in one sequence.
    Flat(Vec<NodeTuple>),
    /// One non-empty group per instance.
    Grouped(Vec<Vec<NodeTuple>>),
}

impl ParsedNodes {
    /// Collapse into a flat sequence.
    pub fn into_flat(self) -> Vec<NodeTuple> {
        match self {
            ParsedNodes::Flat(tuples) => tuples,
            ParsedNodes::Grouped(groups) => groups.into_iter().flatten().collect(),
        }
    }

    /// Total number of tuples.
    pub fn len(&self) -> usize {
        match self {
            ParsedNodes::Flat(tuples) => tuples.len(),
            ParsedNodes::Grouped(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    /// Whether there are no tuples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `[start_label, {prop: val}, rel_type, end_label, {prop: val}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTuple {
    /// Start node label.
    pub start_label: String,
    /// Projected start node properties; never empty.
    pub start: PropertyMap,
    /// Relationship type.
    pub rel_type: String,
    /// End node label.
    pub end_label: String,
    /// Projected end node properties; never empty.
    pub end: PropertyMap,
}

/// `[start_label, {prop: val}, rel_type, {prop: val}, end_label, {prop: val}]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPropsTuple {
    /// Start node label.
    pub start_label: String,
    /// Projected start node properties; never empty.
    pub start: PropertyMap,
    /// Relationship type.
    pub rel_type: String,
    /// Projected relationship properties; never empty.
    pub rel: PropertyMap,
    /// End node label.
    pub end_label: String,
    /// Projected end node properties; never empty.
    pub end: PropertyMap,
}

fn names_of_type(specs: &[PropertySpec], datatype: &str) -> Vec<String> {
    specs
        .iter()
        .filter(|spec| spec.datatype == datatype)
        .map(|spec| spec.property.clone())
        .collect()
}

/// Keep the entries of `properties` named in `keys`.
fn project(properties: &PropertyMap, keys: &[String]) -> PropertyMap {
    keys.iter()
        .filter_map(|key| properties.get(key).map(|v| (key.clone(), v.clone())))
        .collect()
}

/// Properties of `label` declared with `datatype`, in declaration order.
/// Unknown labels have none.
pub fn properties_of_type(schema: &SchemaModel, label: &str, datatype: &str) -> Vec<String> {
    schema
        .node_properties(label)
        .map(|specs| names_of_type(specs, datatype))
        .unwrap_or_default()
}

/// [`properties_of_type`] for several labels, dropping labels with no match.
pub fn nodes_with_properties_of_type<L: AsRef<str>>(
    schema: &SchemaModel,
    labels: &[L],
    datatype: &str,
) -> Vec<LabelProperties> {
    labels
        .iter()
        .filter_map(|label| {
            let label = label.as_ref();
            let properties = properties_of_type(schema, label, datatype);
            (!properties.is_empty()).then(|| LabelProperties {
                label: label.to_string(),
                properties,
            })
        })
        .collect()
}

/// Project node instances onto the properties of `datatype`.
///
/// Emits one tuple per truthy projected value. Instances yielding no tuple
/// are dropped. With `flatten` the per-instance groups are concatenated.
/// The instances are expected to be temporally normalized already.
pub fn parse_node_instances_of_type<L: AsRef<str>>(
    schema: &SchemaModel,
    instances: &[Vec<NodeInstance>],
    labels: &[L],
    datatype: &str,
    flatten: bool,
) -> ParsedNodes {
    let by_label = group_nodes_by_label(instances);
    let mut groups: Vec<Vec<NodeTuple>> = Vec::new();

    for selected in nodes_with_properties_of_type(schema, labels, datatype) {
        let Some(nodes) = by_label.get(selected.label.as_str()) else {
            continue;
        };
        for node in nodes {
            let tuples: Vec<NodeTuple> = selected
                .properties
                .iter()
                .filter_map(|property| {
                    node.properties
                        .get(property)
                        .filter(|value| value.is_truthy())
                        .map(|value| NodeTuple::new(&selected.label, property, value.clone()))
                })
                .collect();
            if !tuples.is_empty() {
                groups.push(tuples);
            }
        }
    }

    if flatten {
        ParsedNodes::Flat(groups.into_iter().flatten().collect())
    } else {
        ParsedNodes::Grouped(groups)
    }
}

/// Project both endpoints of every relationship instance onto the requested
/// datatypes, keeping instances where both projections are non-empty.
pub fn filter_relationship_instances(
    schema: &SchemaModel,
    instances: &[Vec<RelationshipInstance>],
    start_datatype: &str,
    end_datatype: &str,
) -> Vec<RelationshipTuple> {
    instances
        .iter()
        .flatten()
        .filter_map(|instance| {
            let start = project(
                &instance.start,
                &properties_of_type(schema, &instance.start_label, start_datatype),
            );
            let end = project(
                &instance.end,
                &properties_of_type(schema, &instance.end_label, end_datatype),
            );
            (!start.is_empty() && !end.is_empty()).then(|| RelationshipTuple {
                start_label: instance.start_label.clone(),
                start,
                rel_type: instance.rel_type.clone(),
                end_label: instance.end_label.clone(),
                end,
            })
        })
        .collect()
}

/// Like [`filter_relationship_instances`], also projecting the relationship's
/// own properties onto `rel_datatype`.
///
/// Instances whose type declares no `rel_datatype` property are skipped.
pub fn filter_relationship_with_props_instances(
    schema: &SchemaModel,
    instances: &[Vec<RelationshipInstance>],
    start_datatype: &str,
    rel_datatype: &str,
    end_datatype: &str,
) -> Vec<RelationshipPropsTuple> {
    let rel_props = schema.relationship_properties_of_type(rel_datatype);

    instances
        .iter()
        .flatten()
        .filter_map(|instance| {
            let rel_keys = rel_props
                .iter()
                .find(|(rel_type, _)| *rel_type == instance.rel_type)
                .map(|(_, props)| props)?;

            let start = project(
                &instance.start,
                &properties_of_type(schema, &instance.start_label, start_datatype),
            );
            let rel = project(&instance.rel, rel_keys);
            let end = project(
                &instance.end,
                &properties_of_type(schema, &instance.end_label, end_datatype),
            );

            (!start.is_empty() && !rel.is_empty() && !end.is_empty()).then(|| RelationshipPropsTuple {
                start_label: instance.start_label.clone(),
                start,
                rel_type: instance.rel_type.clone(),
                rel,
                end_label: instance.end_label.clone(),
                end,
            })
        })
        .collect()
}

/// Keep relationship instances whose start, relationship and end maps are
/// all non-empty, dropping groups left empty.
pub fn instances_with_relationship_properties(
    instances: &[Vec<RelationshipInstance>],
) -> Vec<Vec<RelationshipInstance>> {
    instances
        .iter()
        .map(|group| {
            group
                .iter()
                .filter(|instance| instance.has_all_properties())
                .cloned()
                .collect::<Vec<_>>()
        })
        .filter(|group| !group.is_empty())
        .collect()
}
