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

//! Complete graph snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use cyphersynth_core::{
    DiscoveryPayload, PropertyMap, PropertyValue, RelationshipSpec, SnapshotSource, ZonedDateTime,
};

use super::builders::{props, DiscoveryBuilder};

/// Discovery output for [`company_graph`].
///
/// - `Person {name: STRING, age: INTEGER, born: STRING}`
/// - `Company {name: STRING, revenue: FLOAT}`
/// - `WORKS_AT {since: INTEGER}`
/// - `(:Person)-[:WORKS_AT]->(:Company)`, `(:Person)-[:KNOWS]->(:Person)`
pub fn company_discovery() -> DiscoveryPayload {
    DiscoveryBuilder::new()
        .node(
            "Person",
            &[("name", "STRING"), ("age", "INTEGER"), ("born", "STRING")],
        )
        .node("Company", &[("name", "STRING"), ("revenue", "FLOAT")])
        .rel_props("WORKS_AT", &[("since", "INTEGER")])
        .relationship("Person", "WORKS_AT", "Company")
        .relationship("Person", "KNOWS", "Person")
        .build()
}

fn person(name: &str, age: i64) -> PropertyMap {
    props(&[("name", name.into()), ("age", age.into())])
}

fn company(name: &str, revenue: f64) -> PropertyMap {
    props(&[("name", name.into()), ("revenue", revenue.into())])
}

/// A small company graph with falsy values sprinkled in.
///
/// Nodes, in source order:
/// - Person: Ann (31), Bo (0), an unnamed person (45)
/// - Company: Acme (12.5), Initech (0.0)
///
/// Relationships:
/// - Ann WORKS_AT Acme since 2019, Bo WORKS_AT Initech (no properties),
///   the unnamed person WORKS_AT Acme since 2021
/// - Ann KNOWS Bo
pub fn company_graph() -> SnapshotSource {
    let works_at = RelationshipSpec::new("Person", "WORKS_AT", "Company");
    let knows = RelationshipSpec::new("Person", "KNOWS", "Person");

    SnapshotSource::new(company_discovery())
        .with_node("Person", person("Ann", 31))
        .with_node("Person", person("Bo", 0))
        .with_node("Person", person("", 45))
        .with_node("Company", company("Acme", 12.5))
        .with_node("Company", company("Initech", 0.0))
        .with_relationship(
            &works_at,
            person("Ann", 31),
            props(&[("since", 2019i64.into())]),
            company("Acme", 12.5),
        )
        .with_relationship(
            &works_at,
            person("Bo", 0),
            PropertyMap::new(),
            company("Initech", 0.0),
        )
        .with_relationship(
            &works_at,
            person("", 45),
            props(&[("since", 2021i64.into())]),
            company("Acme", 12.5),
        )
        .with_relationship(&knows, person("Ann", 31), PropertyMap::new(), person("Bo", 0))
}

/// A graph whose values are database-native dates and date-times.
///
/// - `Event {name: STRING, day: DATE, starts: DATE_TIME}`
/// - `Person {name: STRING}`
/// - `(:Person)-[:ATTENDED {registered: DATE}]->(:Event)`
pub fn temporal_graph() -> SnapshotSource {
    let discovery = DiscoveryBuilder::new()
        .node(
            "Event",
            &[("name", "STRING"), ("day", "DATE"), ("starts", "DATE_TIME")],
        )
        .node("Person", &[("name", "STRING")])
        .rel_props("ATTENDED", &[("registered", "DATE")])
        .relationship("Person", "ATTENDED", "Event")
        .build();

    let event = props(&[
        ("name", "RustConf".into()),
        ("day", date(2024, 9, 10)),
        (
            "starts",
            ZonedDateTime::new(datetime(2024, 9, 10, 9, 30, 0), "Europe/Amsterdam").into(),
        ),
    ]);
    let meetup = props(&[
        ("name", "Meetup".into()),
        ("day", date(2024, 3, 1)),
        ("starts", ZonedDateTime::local(datetime(2024, 3, 1, 18, 0, 5)).into()),
    ]);
    let ann = props(&[("name", "Ann".into())]);

    SnapshotSource::new(discovery)
        .with_node("Event", event.clone())
        .with_node("Event", meetup)
        .with_node("Person", ann.clone())
        .with_relationship(
            &RelationshipSpec::new("Person", "ATTENDED", "Event"),
            ann,
            props(&[("registered", date(2024, 1, 15))]),
            event,
        )
}

/// A graph with a schema but no data.
pub fn empty_graph() -> SnapshotSource {
    SnapshotSource::new(
        DiscoveryBuilder::new()
            .node("Person", &[("name", "STRING")])
            .relationship("Person", "KNOWS", "Person")
            .build(),
    )
}

fn date(year: i32, month: u32, day: u32) -> PropertyValue {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(PropertyValue::from)
        .unwrap_or(PropertyValue::Null)
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyphersynth_core::{GraphSource, SchemaModel};

    #[test]
    fn test_company_graph_shape() {
        let graph = company_graph();
        let schema = SchemaModel::from_discovery(&graph.discover().unwrap()).unwrap();
        assert_eq!(schema.labels(), vec!["Company", "Person"]);
        assert_eq!(schema.relationships().len(), 2);
        assert_eq!(graph.nodes["Person"].len(), 3);
        assert_eq!(graph.relationships.len(), 2);
        assert_eq!(graph.relationships[0].instances.len(), 3);
    }

    #[test]
    fn test_temporal_graph_holds_native_values() {
        let graph = temporal_graph();
        let event = &graph.nodes["Event"][0];
        assert!(event["day"].is_temporal());
        assert!(event["starts"].is_temporal());
    }

    #[test]
    fn test_empty_graph_has_no_rows() {
        let graph = empty_graph();
        assert!(graph.node_rows("Person", 10).unwrap().is_empty());
    }
}
