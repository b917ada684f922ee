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

//! Graph data sources.
//!
//! A [`GraphSource`] answers the three kinds of reads the extractor needs:
//! schema discovery, node rows for one label and relationship rows for one
//! triple. A live implementation runs the statements from
//! [`crate::cypher::queries`]; [`SnapshotSource`] serves the same rows from
//! a JSON file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SynthError};
use crate::schema::{DiscoveryPayload, RelationshipSpec};
use crate::value::{PropertyMap, PropertyValue};

/// One result row: column name to value.
pub type Row = PropertyMap;

/// Read-only access to a property graph.
///
/// Implementations report unreachable databases as
/// [`SynthError::Connectivity`], missing discovery procedures as
/// [`SynthError::Capability`] and rejected statements as
/// [`SynthError::QuerySyntax`]. They must not retry on the caller's behalf.
pub trait GraphSource {
    /// Run schema discovery.
    fn discover(&self) -> Result<DiscoveryPayload>;

    /// Fetch up to `limit` rows `{properties: map}` for nodes with `label`.
    fn node_rows(&self, label: &str, limit: usize) -> Result<Vec<Row>>;

    /// Fetch up to `limit` rows `{start: map, rel: map, end: map}` for one
    /// relationship triple.
    fn relationship_rows(&self, spec: &RelationshipSpec, limit: usize) -> Result<Vec<Row>>;
}

impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn discover(&self) -> Result<DiscoveryPayload> {
        (**self).discover()
    }

    fn node_rows(&self, label: &str, limit: usize) -> Result<Vec<Row>> {
        (**self).node_rows(label, limit)
    }

    fn relationship_rows(&self, spec: &RelationshipSpec, limit: usize) -> Result<Vec<Row>> {
        (**self).relationship_rows(spec, limit)
    }
}

/// Sampled instances of one relationship triple inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRelationship {
    /// Start node label.
    pub start: String,
    /// Relationship type.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// End node label.
    pub end: String,
    /// Rows `{start, rel, end}` in source order.
    #[serde(default)]
    pub instances: Vec<Row>,
}

/// A graph captured as JSON.
///
/// ```json
/// {
///   "discovery": {"node_properties": [], "relationship_properties": [], "relationships": []},
///   "nodes": {"Person": [{"name": "Ann"}]},
///   "relationships": [{"start": "Person", "type": "WORKS_AT", "end": "Company", "instances": []}]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSource {
    /// Discovery output; absent when the capture could not run discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryPayload>,
    /// Node property maps per label, in source order.
    #[serde(default)]
    pub nodes: BTreeMap<String, Vec<PropertyMap>>,
    /// Relationship instances per triple.
    #[serde(default)]
    pub relationships: Vec<SnapshotRelationship>,
}

impl SnapshotSource {
    /// Create an empty snapshot with the given discovery payload.
    pub fn new(discovery: DiscoveryPayload) -> Self {
        Self {
            discovery: Some(discovery),
            ..Default::default()
        }
    }

    /// Add a node to the snapshot.
    pub fn with_node(mut self, label: impl Into<String>, properties: PropertyMap) -> Self {
        self.nodes.entry(label.into()).or_default().push(properties);
        self
    }

    /// Add a relationship instance to the snapshot.
    pub fn with_relationship(
        mut self,
        spec: &RelationshipSpec,
        start: PropertyMap,
        rel: PropertyMap,
        end: PropertyMap,
    ) -> Self {
        let row: Row = [
            ("start".to_string(), PropertyValue::Map(start)),
            ("rel".to_string(), PropertyValue::Map(rel)),
            ("end".to_string(), PropertyValue::Map(end)),
        ]
        .into_iter()
        .collect();

        match self
            .relationships
            .iter_mut()
            .find(|r| r.start == spec.start && r.rel_type == spec.rel_type && r.end == spec.end)
        {
            Some(existing) => existing.instances.push(row),
            None => self.relationships.push(SnapshotRelationship {
                start: spec.start.clone(),
                rel_type: spec.rel_type.clone(),
                end: spec.end.clone(),
                instances: vec![row],
            }),
        }
        self
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SynthError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }
}

impl GraphSource for SnapshotSource {
    fn discover(&self) -> Result<DiscoveryPayload> {
        self.discovery.clone().ok_or_else(|| {
            SynthError::Capability("snapshot carries no schema discovery payload".to_string())
        })
    }

    fn node_rows(&self, label: &str, limit: usize) -> Result<Vec<Row>> {
        Ok(self
            .nodes
            .get(label)
            .map(|nodes| {
                nodes
                    .iter()
                    .take(limit)
                    .map(|props| {
                        [
                            ("label".to_string(), PropertyValue::from(label)),
                            ("properties".to_string(), PropertyValue::Map(props.clone())),
                        ]
                        .into_iter()
                        .collect()
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn relationship_rows(&self, spec: &RelationshipSpec, limit: usize) -> Result<Vec<Row>> {
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.start == spec.start && r.rel_type == spec.rel_type && r.end == spec.end)
            .flat_map(|r| r.instances.iter())
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(entries: &[(&str, &str)]) -> PropertyMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), PropertyValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_snapshot_without_discovery_is_capability_error() {
        let snapshot = SnapshotSource::default();
        assert!(matches!(snapshot.discover(), Err(SynthError::Capability(_))));
    }

    #[test]
    fn test_snapshot_node_rows_respect_limit() {
        let snapshot = SnapshotSource::new(DiscoveryPayload::default())
            .with_node("Person", props(&[("name", "Ann")]))
            .with_node("Person", props(&[("name", "Bo")]))
            .with_node("Person", props(&[("name", "Cy")]));

        let rows = snapshot.node_rows("Person", 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["label"], PropertyValue::from("Person"));
        assert!(snapshot.node_rows("Company", 5).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_relationship_rows() {
        let spec = RelationshipSpec::new("Person", "WORKS_AT", "Company");
        let snapshot = SnapshotSource::new(DiscoveryPayload::default())
            .with_relationship(&spec, props(&[("name", "Ann")]), PropertyMap::new(), props(&[("name", "Acme")]))
            .with_relationship(&spec, props(&[("name", "Bo")]), PropertyMap::new(), props(&[("name", "Acme")]));

        assert_eq!(snapshot.relationships.len(), 1);
        assert_eq!(snapshot.relationship_rows(&spec, 10).unwrap().len(), 2);
        assert_eq!(snapshot.relationship_rows(&spec, 1).unwrap().len(), 1);

        let other = RelationshipSpec::new("Person", "KNOWS", "Person");
        assert!(snapshot.relationship_rows(&other, 10).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{
            "discovery": {"node_properties": [], "relationships": []},
            "nodes": {"Person": [{"name": "Ann", "born": {"$date": "1990-01-02"}}]},
            "relationships": [
                {"start": "Person", "type": "WORKS_AT", "end": "Company",
                 "instances": [{"start": {"name": "Ann"}, "rel": {}, "end": {"name": "Acme"}}]}
            ]
        }"#;
        let snapshot = SnapshotSource::from_json(json).unwrap();
        assert!(snapshot.discover().is_ok());
        let person = &snapshot.nodes["Person"][0];
        assert!(person["born"].is_temporal());
        assert_eq!(snapshot.relationships[0].instances.len(), 1);
    }

    #[test]
    fn test_snapshot_from_missing_path() {
        let err = SnapshotSource::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SynthError::Io { .. }));
    }
}
