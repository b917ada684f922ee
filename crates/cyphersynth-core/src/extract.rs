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

//! Bounded extraction of node and relationship instances.
//!
//! Every call goes to the source; nothing is cached between calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::instance::{NodeInstance, RelationshipInstance};
use crate::schema::{RelationshipSpec, SchemaModel};
use crate::source::GraphSource;
use crate::temporal::{normalize_node_instances, normalize_relationship_instances};

/// Run discovery and build the schema model.
pub fn build_schema<S: GraphSource + ?Sized>(source: &S) -> Result<SchemaModel> {
    let payload = source.discover()?;
    let schema = SchemaModel::from_discovery(&payload)?;
    debug!(
        labels = schema.node_props.len(),
        rel_types = schema.rel_props.len(),
        triples = schema.relationships.len(),
        "built schema"
    );
    Ok(schema)
}

/// Fetch up to `limit` instances for each label, one group per label in
/// input order. Labels without instances yield an empty group.
pub fn extract_node_instances<S, L>(source: &S, labels: &[L], limit: usize) -> Result<Vec<Vec<NodeInstance>>>
where
    S: GraphSource + ?Sized,
    L: AsRef<str>,
{
    labels
        .iter()
        .map(|label| {
            let label = label.as_ref();
            let rows = source.node_rows(label, limit)?;
            debug!(label, rows = rows.len(), "fetched node rows");
            rows.iter()
                .map(|row| NodeInstance::from_row(label, row))
                .collect()
        })
        .collect()
}

/// Fetch up to `limit` instances of one relationship triple.
pub fn extract_relationship_instances<S: GraphSource + ?Sized>(
    source: &S,
    spec: &RelationshipSpec,
    limit: usize,
) -> Result<Vec<RelationshipInstance>> {
    let rows = source.relationship_rows(spec, limit)?;
    debug!(pattern = %spec.pattern(), rows = rows.len(), "fetched relationship rows");
    rows.iter()
        .map(|row| RelationshipInstance::from_row(spec, row))
        .collect()
}

/// [`extract_relationship_instances`] over several triples, in input order.
pub fn extract_multiple_relationship_instances<S: GraphSource + ?Sized>(
    source: &S,
    specs: &[RelationshipSpec],
    limit: usize,
) -> Result<Vec<Vec<RelationshipInstance>>> {
    specs
        .iter()
        .map(|spec| extract_relationship_instances(source, spec, limit))
        .collect()
}

/// The schema plus normalized instances of every label and triple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// The graph schema.
    pub schema: SchemaModel,
    /// Node instances, one group per label.
    pub nodes: Vec<Vec<NodeInstance>>,
    /// Relationship instances, one group per schema triple.
    pub relationships: Vec<Vec<RelationshipInstance>>,
}

impl Extraction {
    /// Build the schema, fetch instances of every label and every triple,
    /// then normalize temporal values.
    ///
    /// A triple repeated in the schema is queried once per occurrence.
    pub fn run<S: GraphSource + ?Sized>(source: &S, config: &ExtractionConfig) -> Result<Self> {
        let schema = build_schema(source)?;

        let labels = schema.labels();
        let mut nodes = extract_node_instances(source, &labels, config.node_limit)?;

        let specs = schema.relationships();
        let mut relationships =
            extract_multiple_relationship_instances(source, specs, config.relationship_limit)?;

        let rewritten = normalize_node_instances(&mut nodes)
            + normalize_relationship_instances(&mut relationships);

        info!(
            labels = labels.len(),
            nodes = nodes.iter().map(Vec::len).sum::<usize>(),
            triples = specs.len(),
            relationships = relationships.iter().map(Vec::len).sum::<usize>(),
            temporal_values = rewritten,
            "extraction complete"
        );

        Ok(Self {
            schema,
            nodes,
            relationships,
        })
    }

    /// Total number of node instances.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(Vec::len).sum()
    }

    /// Total number of relationship instances.
    pub fn relationship_count(&self) -> usize {
        self.relationships.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use crate::schema::DiscoveryPayload;
    use crate::source::{Row, SnapshotSource};
    use crate::value::{PropertyMap, PropertyValue};
    use chrono::NaiveDate;

    fn props(entries: Vec<(&str, PropertyValue)>) -> PropertyMap {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn discovery() -> DiscoveryPayload {
        let spec = |p: &str, d: &str| PropertyValue::Map(props(vec![("property", p.into()), ("datatype", d.into())]));
        DiscoveryPayload {
            node_properties: vec![
                props(vec![("label", "Person".into()), ("properties", PropertyValue::List(vec![spec("name", "STRING"), spec("born", "DATE")]))]),
                props(vec![("label", "Company".into()), ("properties", PropertyValue::List(vec![spec("name", "STRING")]))]),
            ],
            relationship_properties: vec![],
            relationships: vec![
                props(vec![("start", "Person".into()), ("type", "WORKS_AT".into()), ("end", "Company".into())]),
                props(vec![("start", "Person".into()), ("type", "WORKS_AT".into()), ("end", "Company".into())]),
            ],
        }
    }

    fn snapshot() -> SnapshotSource {
        let spec = RelationshipSpec::new("Person", "WORKS_AT", "Company");
        let born = NaiveDate::from_ymd_opt(1990, 5, 4).unwrap();
        SnapshotSource::new(discovery())
            .with_node("Person", props(vec![("name", "Ann".into()), ("born", born.into())]))
            .with_node("Person", props(vec![("name", "Bo".into())]))
            .with_node("Company", props(vec![("name", "Acme".into())]))
            .with_relationship(
                &spec,
                props(vec![("name", "Ann".into())]),
                PropertyMap::new(),
                props(vec![("name", "Acme".into())]),
            )
    }

    struct BrokenSource;

    impl GraphSource for BrokenSource {
        fn discover(&self) -> Result<DiscoveryPayload> {
            Err(SynthError::Connectivity("refused".to_string()))
        }

        fn node_rows(&self, _label: &str, _limit: usize) -> Result<Vec<Row>> {
            Ok(vec![props(vec![("label", "Person".into())])])
        }

        fn relationship_rows(&self, _spec: &RelationshipSpec, _limit: usize) -> Result<Vec<Row>> {
            Err(SynthError::QuerySyntax {
                query: "MATCH".to_string(),
                message: "bad".to_string(),
            })
        }
    }

    #[test]
    fn test_extract_node_instances_per_label() {
        let source = snapshot();
        let groups = extract_node_instances(&source, &["Person", "Company", "Missing"], 10).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1][0].label, "Company");
        assert!(groups[2].is_empty());
    }

    #[test]
    fn test_extract_node_instances_limit() {
        let source = snapshot();
        let groups = extract_node_instances(&source, &["Person"], 1).unwrap();
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_extract_multiple_relationship_instances_order() {
        let source = snapshot();
        let specs = vec![
            RelationshipSpec::new("Person", "KNOWS", "Person"),
            RelationshipSpec::new("Person", "WORKS_AT", "Company"),
        ];
        let groups = extract_multiple_relationship_instances(&source, &specs, 5).unwrap();
        assert!(groups[0].is_empty());
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].end_label, "Company");
    }

    #[test]
    fn test_extraction_run_normalizes_and_keeps_repeated_triples() {
        let extraction = Extraction::run(&snapshot(), &ExtractionConfig::default()).unwrap();
        assert_eq!(extraction.schema.relationships().len(), 2);
        assert_eq!(extraction.relationships.len(), 2);
        assert_eq!(extraction.relationships[0], extraction.relationships[1]);
        assert_eq!(extraction.node_count(), 3);
        assert_eq!(extraction.relationship_count(), 2);

        let ann = extraction
            .nodes
            .iter()
            .flatten()
            .find(|n| n.get_property("name") == Some(&PropertyValue::from("Ann")))
            .unwrap();
        assert_eq!(ann.properties["born"], PropertyValue::from("1990-05-04"));
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(build_schema(&BrokenSource), Err(SynthError::Connectivity(_))));
        assert!(matches!(
            extract_node_instances(&BrokenSource, &["Person"], 1),
            Err(SynthError::DataFormat { .. })
        ));
        let spec = RelationshipSpec::new("A", "R", "B");
        assert!(matches!(
            extract_relationship_instances(&BrokenSource, &spec, 1),
            Err(SynthError::QuerySyntax { .. })
        ));
    }
}
