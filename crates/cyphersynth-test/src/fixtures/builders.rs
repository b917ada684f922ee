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

//! Builder pattern for creating customizable test fixtures.

use cyphersynth_core::{DiscoveryPayload, PropertyMap, PropertyValue, Row};

/// Build a property map from (name, value) pairs.
///
/// # Examples
///
/// ```
/// use cyphersynth_test::fixtures::builders::props;
///
/// let map = props(&[("name", "Ann".into()), ("age", 31i64.into())]);
/// assert_eq!(map.len(), 2);
/// ```
pub fn props(entries: &[(&str, PropertyValue)]) -> PropertyMap {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// Builder for raw schema discovery output, in the row shape the
/// discovery queries return.
///
/// # Examples
///
/// ```
/// use cyphersynth_test::fixtures::builders::DiscoveryBuilder;
/// use cyphersynth_core::SchemaModel;
///
/// let payload = DiscoveryBuilder::new()
///     .node("Person", &[("name", "STRING")])
///     .node("Company", &[("name", "STRING")])
///     .relationship("Person", "WORKS_AT", "Company")
///     .build();
///
/// let schema = SchemaModel::from_discovery(&payload).unwrap();
/// assert_eq!(schema.labels(), vec!["Company", "Person"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryBuilder {
    payload: DiscoveryPayload,
}

impl DiscoveryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node property group.
    pub fn node(mut self, label: &str, properties: &[(&str, &str)]) -> Self {
        self.payload
            .node_properties
            .push(property_group("label", label, properties));
        self
    }

    /// Adds a relationship property group.
    pub fn rel_props(mut self, rel_type: &str, properties: &[(&str, &str)]) -> Self {
        self.payload
            .relationship_properties
            .push(property_group("type", rel_type, properties));
        self
    }

    /// Adds a relationship triple.
    pub fn relationship(mut self, start: &str, rel_type: &str, end: &str) -> Self {
        self.payload.relationships.push(props(&[
            ("start", start.into()),
            ("type", rel_type.into()),
            ("end", end.into()),
        ]));
        self
    }

    /// Adds a raw row to the node property groups, for malformed input.
    pub fn raw_node_row(mut self, row: Row) -> Self {
        self.payload.node_properties.push(row);
        self
    }

    /// Builds the payload.
    pub fn build(self) -> DiscoveryPayload {
        self.payload
    }
}

fn property_group(key: &str, name: &str, properties: &[(&str, &str)]) -> Row {
    let specs = properties
        .iter()
        .map(|(property, datatype)| {
            PropertyValue::Map(props(&[
                ("property", (*property).into()),
                ("datatype", (*datatype).into()),
            ]))
        })
        .collect();
    props(&[(key, name.into()), ("properties", PropertyValue::List(specs))])
}
