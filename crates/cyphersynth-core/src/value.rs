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

//! Property values as returned by a graph source.
//!
//! Scalars, lists and maps use their plain JSON form. Temporal values use a
//! small tagged object so that they survive a JSON round trip:
//!
//! ```json
//! {"$date": "2023-10-25"}
//! {"$datetime": "2023-11-10T12:23:32", "$tz": "UTC"}
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::cypher::escape::{escape_identifier, quote_string};
use crate::temporal::{format_date, format_datetime};

const DATE_KEY: &str = "$date";
const DATETIME_KEY: &str = "$datetime";
const TZ_KEY: &str = "$tz";

/// A property map keyed by property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A date-time as reported by the database, with its timezone kept as the
/// source's own textual representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDateTime {
    /// Wall-clock date and time.
    pub datetime: NaiveDateTime,
    /// Timezone text exactly as the source rendered it (e.g. `UTC`,
    /// `Europe/Paris`, `+02:00`).
    pub timezone: Option<String>,
}

impl ZonedDateTime {
    /// Create a date-time with a timezone representation.
    pub fn new(datetime: NaiveDateTime, timezone: impl Into<String>) -> Self {
        Self {
            datetime,
            timezone: Some(timezone.into()),
        }
    }

    /// Create a date-time without timezone information.
    pub fn local(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            timezone: None,
        }
    }
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<PropertyValue>),
    /// Map value.
    Map(PropertyMap),
    /// Database-native date, rewritten to a string by normalization.
    Date(NaiveDate),
    /// Database-native date-time, rewritten to a string by normalization.
    DateTime(ZonedDateTime),
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(v as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<NaiveDate> for PropertyValue {
    fn from(v: NaiveDate) -> Self {
        PropertyValue::Date(v)
    }
}

impl From<ZonedDateTime> for PropertyValue {
    fn from(v: ZonedDateTime) -> Self {
        PropertyValue::DateTime(v)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(v: Vec<T>) -> Self {
        PropertyValue::List(v.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(x) => x.into(),
            None => PropertyValue::Null,
        }
    }
}

impl PropertyValue {
    /// Whether the value counts as present when sampling.
    ///
    /// Null, `false`, zero, the empty string and empty collections are not
    /// truthy. Temporal values always are.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Null => false,
            PropertyValue::Bool(b) => *b,
            PropertyValue::Int(i) => *i != 0,
            PropertyValue::Float(f) => *f != 0.0,
            PropertyValue::String(s) => !s.is_empty(),
            PropertyValue::List(items) => !items.is_empty(),
            PropertyValue::Map(map) => !map.is_empty(),
            PropertyValue::Date(_) | PropertyValue::DateTime(_) => true,
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Check if this is a database-native temporal value.
    pub fn is_temporal(&self) -> bool {
        matches!(self, PropertyValue::Date(_) | PropertyValue::DateTime(_))
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a list.
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as a map.
    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to Cypher literal syntax.
    ///
    /// Temporal values become `date(...)` / `datetime(...)` calls.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            PropertyValue::Null => "null".to_string(),
            PropertyValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            PropertyValue::Int(i) => i.to_string(),
            PropertyValue::Float(f) => float_literal(*f),
            PropertyValue::String(s) => quote_string(s),
            PropertyValue::List(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.to_cypher_literal()).collect();
                format!("[{}]", inner.join(", "))
            }
            PropertyValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", escape_identifier(k), v.to_cypher_literal()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            PropertyValue::Date(d) => format!("date({})", quote_string(&format_date(d))),
            PropertyValue::DateTime(dt) => {
                let iso = dt.datetime.format("%Y-%m-%dT%H:%M:%S").to_string();
                match &dt.timezone {
                    Some(tz) => format!("datetime({{datetime: {}, timezone: {}}})", quote_string(&iso), quote_string(tz)),
                    None => format!("localdatetime({})", quote_string(&iso)),
                }
            }
        }
    }

    fn from_json(value: serde_json::Value) -> std::result::Result<Self, String> {
        Ok(match value {
            serde_json::Value::Null => PropertyValue::Null,
            serde_json::Value::Bool(b) => PropertyValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropertyValue::Int(i),
                None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => PropertyValue::String(s),
            serde_json::Value::Array(items) => PropertyValue::List(
                items
                    .into_iter()
                    .map(PropertyValue::from_json)
                    .collect::<std::result::Result<_, _>>()?,
            ),
            serde_json::Value::Object(map) => {
                if let Some(temporal) = temporal_from_json(&map)? {
                    return Ok(temporal);
                }
                PropertyValue::Map(
                    map.into_iter()
                        .map(|(k, v)| Ok((k, PropertyValue::from_json(v)?)))
                        .collect::<std::result::Result<_, String>>()?,
                )
            }
        })
    }
}

/// Recognize the tagged temporal objects; other objects are plain maps.
fn temporal_from_json(
    map: &serde_json::Map<String, serde_json::Value>,
) -> std::result::Result<Option<PropertyValue>, String> {
    if map.len() == 1 {
        if let Some(serde_json::Value::String(s)) = map.get(DATE_KEY) {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| format!("invalid {} value '{}': {}", DATE_KEY, s, e))?;
            return Ok(Some(PropertyValue::Date(date)));
        }
    }

    let tz = match map.get(TZ_KEY) {
        Some(serde_json::Value::String(tz)) => Some(tz.clone()),
        Some(_) => return Ok(None),
        None => None,
    };
    let expected_len = if tz.is_some() { 2 } else { 1 };
    if map.len() == expected_len {
        if let Some(serde_json::Value::String(s)) = map.get(DATETIME_KEY) {
            let datetime = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|e| format!("invalid {} value '{}': {}", DATETIME_KEY, s, e))?;
            return Ok(Some(PropertyValue::DateTime(ZonedDateTime {
                datetime,
                timezone: tz,
            })));
        }
    }
    Ok(None)
}

fn float_literal(f: f64) -> String {
    if f.is_nan() {
        "0.0/0.0".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "1.0/0.0".to_string()
        } else {
            "-1.0/0.0".to_string()
        }
    } else {
        let s = f.to_string();
        if s.contains('.') || s.contains('e') || s.contains('E') {
            s
        } else {
            format!("{}.0", s)
        }
    }
}

impl fmt::Display for PropertyValue {
    /// Human-readable form used in questions and prompts: strings are
    /// unquoted, temporal values use their normalized text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(i) => write!(f, "{}", i),
            PropertyValue::Float(v) => write!(f, "{}", float_literal(*v)),
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::List(_) | PropertyValue::Map(_) => {
                write!(f, "{}", self.to_cypher_literal())
            }
            PropertyValue::Date(d) => write!(f, "{}", format_date(d)),
            PropertyValue::DateTime(dt) => write!(f, "{}", format_datetime(dt)),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Null => serializer.serialize_unit(),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::Int(i) => serializer.serialize_i64(*i),
            PropertyValue::Float(f) => serializer.serialize_f64(*f),
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::List(items) => items.serialize(serializer),
            PropertyValue::Map(map) => map.serialize(serializer),
            PropertyValue::Date(d) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(DATE_KEY, &d.format("%Y-%m-%d").to_string())?;
                map.end()
            }
            PropertyValue::DateTime(dt) => {
                let len = if dt.timezone.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry(
                    DATETIME_KEY,
                    &dt.datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
                )?;
                if let Some(tz) = &dt.timezone {
                    map.serialize_entry(TZ_KEY, tz)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        PropertyValue::from_json(json).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_truthiness() {
        assert!(!PropertyValue::Null.is_truthy());
        assert!(!PropertyValue::Bool(false).is_truthy());
        assert!(!PropertyValue::Int(0).is_truthy());
        assert!(!PropertyValue::Float(0.0).is_truthy());
        assert!(!PropertyValue::from("").is_truthy());
        assert!(!PropertyValue::List(vec![]).is_truthy());
        assert!(!PropertyValue::Map(PropertyMap::new()).is_truthy());

        assert!(PropertyValue::from("Ann").is_truthy());
        assert!(PropertyValue::Int(-1).is_truthy());
        assert!(PropertyValue::Date(date(2023, 10, 25)).is_truthy());
    }

    #[test]
    fn test_cypher_literals() {
        assert_eq!(PropertyValue::Int(42).to_cypher_literal(), "42");
        assert_eq!(PropertyValue::Float(3.0).to_cypher_literal(), "3.0");
        assert_eq!(PropertyValue::from("it's").to_cypher_literal(), "'it\\'s'");
        assert_eq!(
            PropertyValue::from(vec![1i64, 2]).to_cypher_literal(),
            "[1, 2]"
        );
        assert_eq!(
            PropertyValue::Date(date(2023, 1, 5)).to_cypher_literal(),
            "date('2023-01-05')"
        );
    }

    #[test]
    fn test_display_unquotes_strings() {
        assert_eq!(PropertyValue::from("Ann").to_string(), "Ann");
        assert_eq!(PropertyValue::Float(1.5).to_string(), "1.5");
        assert_eq!(PropertyValue::Float(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_deserialize_plain_json() {
        let value: PropertyValue =
            serde_json::from_str(r#"{"name": "Ann", "age": 31, "score": 0.5, "tags": ["a"]}"#)
                .unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("name"), Some(&PropertyValue::from("Ann")));
        assert_eq!(map.get("age"), Some(&PropertyValue::Int(31)));
        assert_eq!(map.get("score"), Some(&PropertyValue::Float(0.5)));
        assert_eq!(map.get("tags"), Some(&PropertyValue::from(vec!["a"])));
    }

    #[test]
    fn test_deserialize_temporals() {
        let value: PropertyValue = serde_json::from_str(r#"{"$date": "2023-10-25"}"#).unwrap();
        assert_eq!(value, PropertyValue::Date(date(2023, 10, 25)));

        let value: PropertyValue =
            serde_json::from_str(r#"{"$datetime": "2023-11-10T12:23:32", "$tz": "UTC"}"#).unwrap();
        match value {
            PropertyValue::DateTime(dt) => {
                assert_eq!(dt.timezone.as_deref(), Some("UTC"));
                assert_eq!(dt.datetime.date(), date(2023, 11, 10));
            }
            other => panic!("Expected datetime, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_map_with_extra_keys_is_not_temporal() {
        let value: PropertyValue =
            serde_json::from_str(r#"{"$date": "2023-10-25", "other": 1}"#).unwrap();
        assert!(value.as_map().is_some());
    }

    #[test]
    fn test_deserialize_invalid_date_fails() {
        let result = serde_json::from_str::<PropertyValue>(r#"{"$date": "25/10/2023"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_temporal_json_roundtrip() {
        let dt = ZonedDateTime::new(
            NaiveDateTime::parse_from_str("2023-11-10T12:23:32", "%Y-%m-%dT%H:%M:%S").unwrap(),
            "Europe/Paris",
        );
        let value = PropertyValue::DateTime(dt);
        let json = serde_json::to_string(&value).unwrap();
        let back: PropertyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
