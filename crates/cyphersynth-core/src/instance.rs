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

//! Node and relationship instances sampled from the graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SynthError};
use crate::schema::RelationshipSpec;
use crate::source::Row;
use crate::value::{PropertyMap, PropertyValue};

/// A sampled node: its label and property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInstance {
    /// The node's label.
    pub label: String,
    /// The node's properties.
    pub properties: PropertyMap,
}

impl NodeInstance {
    /// Create a node instance without properties.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Add a property to the node.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Get a property value.
    pub fn get_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Build a node instance from a source row.
    ///
    /// The row must carry a `properties` map. A `label` field, when present,
    /// must name the requested label.
    pub fn from_row(label: &str, row: &Row) -> Result<Self> {
        if let Some(row_label) = row.get("label") {
            if row_label.as_str() != Some(label) {
                return Err(SynthError::data_format("node instance", "label"));
            }
        }
        let properties = map_field(row, "properties", "node instance")?;
        Ok(Self {
            label: label.to_string(),
            properties,
        })
    }
}

/// A sampled relationship with both endpoint nodes.
///
/// The start and end labels and the relationship type are filled in from
/// the [`RelationshipSpec`] that was queried, never recovered from field
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipInstance {
    /// Label of the start node.
    pub start_label: String,
    /// Properties of the start node.
    pub start: PropertyMap,
    /// Relationship type.
    pub rel_type: String,
    /// Properties of the relationship itself.
    pub rel: PropertyMap,
    /// Label of the end node.
    pub end_label: String,
    /// Properties of the end node.
    pub end: PropertyMap,
}

impl RelationshipInstance {
    /// Create a relationship instance with empty property maps.
    pub fn new(
        start_label: impl Into<String>,
        rel_type: impl Into<String>,
        end_label: impl Into<String>,
    ) -> Self {
        Self {
            start_label: start_label.into(),
            start: PropertyMap::new(),
            rel_type: rel_type.into(),
            rel: PropertyMap::new(),
            end_label: end_label.into(),
            end: PropertyMap::new(),
        }
    }

    /// Add a property to the start node.
    pub fn with_start_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.start.insert(name.into(), value.into());
        self
    }

    /// Add a property to the relationship.
    pub fn with_rel_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.rel.insert(name.into(), value.into());
        self
    }

    /// Add a property to the end node.
    pub fn with_end_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.end.insert(name.into(), value.into());
        self
    }

    /// The triple this instance belongs to.
    pub fn spec(&self) -> RelationshipSpec {
        RelationshipSpec::new(&self.start_label, &self.rel_type, &self.end_label)
    }

    /// Whether the start, relationship and end maps are all non-empty.
    pub fn has_all_properties(&self) -> bool {
        !self.start.is_empty() && !self.rel.is_empty() && !self.end.is_empty()
    }

    /// Build a relationship instance from a source row with `start`, `rel`
    /// and `end` maps.
    pub fn from_row(spec: &RelationshipSpec, row: &Row) -> Result<Self> {
        const RECORD: &str = "relationship instance";
        Ok(Self {
            start_label: spec.start.clone(),
            start: map_field(row, "start", RECORD)?,
            rel_type: spec.rel_type.clone(),
            rel: map_field(row, "rel", RECORD)?,
            end_label: spec.end.clone(),
            end: map_field(row, "end", RECORD)?,
        })
    }
}

/// Take a map-valued field out of a row. A null field reads as an empty map.
fn map_field(row: &Row, field: &str, record: &str) -> Result<PropertyMap> {
    match row.get(field) {
        Some(PropertyValue::Map(map)) => Ok(map.clone()),
        Some(PropertyValue::Null) => Ok(PropertyMap::new()),
        _ => Err(SynthError::data_format(record, field)),
    }
}

/// Group node instances by label, preserving per-label order.
pub fn group_nodes_by_label<'a>(
    groups: &'a [Vec<NodeInstance>],
) -> BTreeMap<&'a str, Vec<&'a NodeInstance>> {
    let mut by_label: BTreeMap<&str, Vec<&NodeInstance>> = BTreeMap::new();
    for node in groups.iter().flatten() {
        by_label.entry(node.label.as_str()).or_default().push(node);
    }
    by_label
}
