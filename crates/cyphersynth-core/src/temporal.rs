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

//! Rewriting of database-native temporal values into plain strings.
//!
//! Sampled instances end up in JSON training records and in Cypher
//! literals, so dates and date-times are turned into text before any
//! filtering happens:
//!
//! | Value | Text |
//! |-------|------|
//! | date | `2023-10-25` |
//! | date-time | `2023-11-10 T 12:23:32 UTC` |
//!
//! Month, day, hour, minute and second are zero-padded, the year is not.
//! The timezone is copied verbatim from the source.

use chrono::{Datelike, NaiveDate, Timelike};

use crate::instance::{NodeInstance, RelationshipInstance};
use crate::value::{PropertyMap, PropertyValue, ZonedDateTime};

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: &NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Render a date-time as `YYYY-MM-DD T HH:MM:SS <timezone>`.
///
/// A date-time without timezone information ends after the seconds.
pub fn format_datetime(value: &ZonedDateTime) -> String {
    let dt = &value.datetime;
    let base = format!(
        "{}-{:02}-{:02} T {:02}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    );
    match &value.timezone {
        Some(tz) => format!("{} {}", base, tz),
        None => base,
    }
}

/// Rewrite every temporal value of a property map in place.
///
/// Returns the number of rewritten values.
pub fn normalize_properties(properties: &mut PropertyMap) -> usize {
    let mut rewritten = 0;
    for value in properties.values_mut() {
        let text = match value {
            PropertyValue::Date(date) => format_date(date),
            PropertyValue::DateTime(dt) => format_datetime(dt),
            _ => continue,
        };
        *value = PropertyValue::String(text);
        rewritten += 1;
    }
    rewritten
}

/// Normalize the property maps of every node instance.
pub fn normalize_node_instances(instances: &mut [Vec<NodeInstance>]) -> usize {
    instances
        .iter_mut()
        .flatten()
        .map(|instance| normalize_properties(&mut instance.properties))
        .sum()
}

/// Normalize the start, relationship and end maps of every relationship instance.
pub fn normalize_relationship_instances(instances: &mut [Vec<RelationshipInstance>]) -> usize {
    instances
        .iter_mut()
        .flatten()
        .map(|instance| {
            normalize_properties(&mut instance.start)
                + normalize_properties(&mut instance.rel)
                + normalize_properties(&mut instance.end)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn datetime(s: &str) -> chrono::NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_format_date_pads_month_and_day() {
        let d = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(format_date(&d), "2023-01-05");
    }

    #[test]
    fn test_format_date_does_not_pad_year() {
        let d = NaiveDate::from_ymd_opt(987, 3, 9).unwrap();
        assert_eq!(format_date(&d), "987-03-09");
    }

    #[test]
    fn test_format_datetime_keeps_timezone_verbatim() {
        let dt = ZonedDateTime::new(datetime("2023-11-10T02:03:04"), "Europe/Paris");
        assert_eq!(format_datetime(&dt), "2023-11-10 T 02:03:04 Europe/Paris");

        let dt = ZonedDateTime::new(datetime("2023-11-10T12:23:32"), "<UTC>");
        assert_eq!(format_datetime(&dt), "2023-11-10 T 12:23:32 <UTC>");
    }

    #[test]
    fn test_format_datetime_without_timezone() {
        let dt = ZonedDateTime::local(datetime("2024-02-29T23:59:59"));
        assert_eq!(format_datetime(&dt), "2024-02-29 T 23:59:59");
    }

    #[test]
    fn test_normalize_properties_rewrites_only_temporals() {
        let mut props = PropertyMap::new();
        props.insert("born".to_string(), NaiveDate::from_ymd_opt(1990, 7, 1).unwrap().into());
        props.insert(
            "seen".to_string(),
            ZonedDateTime::new(datetime("2023-11-10T12:23:32"), "UTC").into(),
        );
        props.insert("name".to_string(), "Ann".into());
        props.insert("age".to_string(), 33i64.into());

        let count = normalize_properties(&mut props);

        assert_eq!(count, 2);
        assert_eq!(props["born"], PropertyValue::from("1990-07-01"));
        assert_eq!(props["seen"], PropertyValue::from("2023-11-10 T 12:23:32 UTC"));
        assert_eq!(props["name"], PropertyValue::from("Ann"));
        assert_eq!(props["age"], PropertyValue::Int(33));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut props = PropertyMap::new();
        props.insert("born".to_string(), NaiveDate::from_ymd_opt(1990, 7, 1).unwrap().into());
        normalize_properties(&mut props);
        let once = props.clone();
        assert_eq!(normalize_properties(&mut props), 0);
        assert_eq!(props, once);
    }

    #[test]
    fn test_normalize_relationship_instances_touches_all_three_maps() {
        let d = NaiveDate::from_ymd_opt(2020, 2, 2).unwrap();
        let instance = RelationshipInstance::new("Person", "WORKS_AT", "Company")
            .with_start_property("born", d)
            .with_rel_property("since", d)
            .with_end_property("founded", d);
        let mut groups = vec![vec![instance]];

        assert_eq!(normalize_relationship_instances(&mut groups), 3);
        let rel = &groups[0][0];
        assert_eq!(rel.start["born"], PropertyValue::from("2020-02-02"));
        assert_eq!(rel.rel["since"], PropertyValue::from("2020-02-02"));
        assert_eq!(rel.end["founded"], PropertyValue::from("2020-02-02"));
    }

    #[test]
    fn test_normalize_node_instances() {
        let d = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        let mut groups = vec![
            vec![NodeInstance::new("Person").with_property("born", d)],
            vec![],
        ];
        assert_eq!(normalize_node_instances(&mut groups), 1);
        assert_eq!(
            groups[0][0].properties["born"],
            PropertyValue::from("2020-12-31")
        );
    }
}
