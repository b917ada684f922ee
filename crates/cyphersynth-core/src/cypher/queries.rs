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

//! Statements a live [`GraphSource`](crate::source::GraphSource) runs.
//!
//! Discovery relies on the APOC `apoc.meta.data()` procedure; a database
//! without APOC should surface [`SynthError::Capability`](crate::SynthError::Capability).
//! Every statement returns a single `output` column whose rows match the
//! shapes [`SchemaModel::from_discovery`](crate::SchemaModel::from_discovery)
//! and the instance parsers expect.

use super::escape::{escape_label, escape_relationship_type};
use super::statements::CypherStatement;
use crate::schema::RelationshipSpec;

/// Node property groups: `{label, properties: [{property, datatype}]}`.
pub fn node_properties_query() -> CypherStatement {
    CypherStatement::new(
        "CALL apoc.meta.data()\n\
         YIELD label, other, elementType, type, property\n\
         WHERE NOT type = \"RELATIONSHIP\" AND elementType = \"node\"\n\
         WITH label AS nodeLabels, collect({property: property, datatype: type}) AS properties\n\
         RETURN {label: nodeLabels, properties: properties} AS output",
    )
    .with_comment("node property groups")
}

/// Relationship property groups: `{type, properties: [{property, datatype}]}`.
pub fn relationship_properties_query() -> CypherStatement {
    CypherStatement::new(
        "CALL apoc.meta.data()\n\
         YIELD label, other, elementType, type, property\n\
         WHERE NOT type = \"RELATIONSHIP\" AND elementType = \"relationship\"\n\
         WITH label AS relType, collect({property: property, datatype: type}) AS properties\n\
         RETURN {type: relType, properties: properties} AS output",
    )
    .with_comment("relationship property groups")
}

/// Relationship triples: `{start, type, end}`.
pub fn relationships_query() -> CypherStatement {
    CypherStatement::new(
        "CALL apoc.meta.data()\n\
         YIELD label, other, elementType, type, property\n\
         WHERE type = \"RELATIONSHIP\" AND elementType = \"node\"\n\
         UNWIND other AS other_node\n\
         RETURN {start: label, type: property, end: toString(other_node)} AS output",
    )
    .with_comment("relationship triples")
}

/// Up to `$limit` rows `{label, properties}` for one label.
pub fn node_instances_query(label: &str, limit: usize) -> CypherStatement {
    CypherStatement::new(format!(
        "MATCH (n{}) WITH n LIMIT $limit\n\
         RETURN {{label: $label, properties: properties(n)}} AS output",
        escape_label(label)
    ))
    .with_param("label", label)
    .with_param("limit", limit as i64)
}

/// Up to `$limit` rows `{start, rel, end}` for one relationship triple.
pub fn relationship_instances_query(spec: &RelationshipSpec, limit: usize) -> CypherStatement {
    CypherStatement::new(format!(
        "MATCH (a{})-[r{}]->(b{})\n\
         RETURN {{start: properties(a), rel: properties(r), end: properties(b)}} AS output\n\
         LIMIT $limit",
        escape_label(&spec.start),
        escape_relationship_type(&spec.rel_type),
        escape_label(&spec.end)
    ))
    .with_param("limit", limit as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_queries_use_apoc() {
        for stmt in [
            node_properties_query(),
            relationship_properties_query(),
            relationships_query(),
        ] {
            assert!(stmt.query.starts_with("CALL apoc.meta.data()"));
            assert!(stmt.query.ends_with("AS output"));
            assert!(!stmt.has_parameters());
        }
        assert!(relationships_query().query.contains("UNWIND other"));
        assert!(relationship_properties_query().query.contains("elementType = \"relationship\""));
    }

    #[test]
    fn test_node_instances_query() {
        let stmt = node_instances_query("Person", 10);
        assert_eq!(
            stmt.render_inline(),
            "MATCH (n:Person) WITH n LIMIT 10\nRETURN {label: 'Person', properties: properties(n)} AS output"
        );
    }

    #[test]
    fn test_node_instances_query_escapes_label() {
        let stmt = node_instances_query("Movie Star", 3);
        assert!(stmt.query.starts_with("MATCH (n:`Movie Star`)"));
        assert_eq!(stmt.parameters["label"].as_str(), Some("Movie Star"));
    }

    #[test]
    fn test_relationship_instances_query() {
        let spec = RelationshipSpec::new("Person", "WORKS_AT", "Company");
        let stmt = relationship_instances_query(&spec, 7);
        let text = stmt.render_inline();
        assert!(text.starts_with("MATCH (a:Person)-[r:WORKS_AT]->(b:Company)"));
        assert!(text.ends_with("LIMIT 7"));
    }
}
