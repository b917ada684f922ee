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

//! Minimal schema descriptions scoped to a handful of labels and types.
//!
//! ```text
//! Relevant node labels and their properties (with datatypes) are:
//! Person {name: STRING}
//!
//! Relevant relationships are:
//! {'start': Person, 'type': WORKS_AT, 'end': Company}
//!
//! Relevant relationship properties (with datatypes) are:
//! WORKS_AT {since: DATE}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub use crate::config::SubschemaOptions;
use crate::error::{Result, SynthError};
use crate::schema::{PropertySpec, SchemaModel};

/// A node label, optionally narrowed to one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSelector {
    /// Node label.
    pub label: String,
    /// Property to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl NodeSelector {
    /// Select a bare label.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            property: None,
        }
    }

    /// Select one property of a label.
    pub fn property(label: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            property: Some(property.into()),
        }
    }
}

/// A relationship type, optionally narrowed to one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelSelector {
    /// Relationship type.
    pub rel_type: String,
    /// Property to show.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl RelSelector {
    /// Select a bare relationship type.
    pub fn rel_type(rel_type: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            property: None,
        }
    }

    /// Select one property of a relationship type.
    pub fn property(rel_type: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
            property: Some(property.into()),
        }
    }
}

/// Split `Name` or `Name.property`.
fn split_selector(s: &str) -> Result<(String, Option<String>)> {
    let (name, property) = match s.split_once('.') {
        Some((name, property)) => (name, Some(property)),
        None => (s, None),
    };
    if name.is_empty() || property.map_or(false, str::is_empty) {
        return Err(SynthError::InvalidIdentifier(s.to_string()));
    }
    Ok((name.to_string(), property.map(str::to_string)))
}

impl FromStr for NodeSelector {
    type Err = SynthError;

    /// Parse `Label` or `Label.property`.
    fn from_str(s: &str) -> Result<Self> {
        let (label, property) = split_selector(s)?;
        Ok(Self { label, property })
    }
}

impl FromStr for RelSelector {
    type Err = SynthError;

    /// Parse `TYPE` or `TYPE.property`.
    fn from_str(s: &str) -> Result<Self> {
        let (rel_type, property) = split_selector(s)?;
        Ok(Self { rel_type, property })
    }
}

/// Look up the declaration a selector names. A property the schema does
/// not declare degrades to the bare name.
fn resolve<'a>(
    declared: &'a BTreeMap<String, Vec<PropertySpec>>,
    name: &'a str,
    property: Option<&str>,
) -> (&'a str, Option<&'a PropertySpec>) {
    let spec = property.and_then(|property| {
        declared
            .get(name)
            .and_then(|specs| specs.iter().find(|spec| spec.property == property))
    });
    (name, spec)
}

fn format_block(name: &str, spec: Option<&PropertySpec>, include_types: bool) -> String {
    let props = match spec {
        Some(spec) if include_types => format!("{}: {}", spec.property, spec.datatype),
        Some(spec) => spec.property.clone(),
        None => String::new(),
    };
    format!("{} {{{}}}", name, props)
}

fn section(header: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        header.to_string()
    } else {
        format!("{}\n{}", header, lines.join("\n"))
    }
}

/// Render the subschema for the selected labels and relationship types.
///
/// Each selected type is shown with the first triple of that type.
///
/// # Errors
///
/// Returns [`SynthError::Lookup`] if a selected type has no triple.
pub fn render_subschema(
    schema: &SchemaModel,
    nodes: &[NodeSelector],
    rels: &[RelSelector],
    options: SubschemaOptions,
) -> Result<String> {
    let with_types = if options.include_types {
        " (with datatypes)"
    } else {
        ""
    };

    let node_lines: Vec<String> = nodes
        .iter()
        .map(|selector| {
            let (label, spec) = resolve(&schema.node_props, &selector.label, selector.property.as_deref());
            if options.include_node_props {
                format_block(label, spec, options.include_types)
            } else {
                label.to_string()
            }
        })
        .collect();

    let triple_lines = rels
        .iter()
        .map(|selector| {
            schema
                .find_relationship(&selector.rel_type)
                .map(|r| format!("{{'start': {}, 'type': {}, 'end': {}}}", r.start, r.rel_type, r.end))
                .ok_or_else(|| SynthError::Lookup(selector.rel_type.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut sections = vec![
        section(
            &format!("Relevant node labels and their properties{} are:", with_types),
            &node_lines,
        ),
        section("Relevant relationships are:", &triple_lines),
    ];

    if options.include_rel_props {
        let rel_lines: Vec<String> = rels
            .iter()
            .map(|selector| {
                let (rel_type, spec) =
                    resolve(&schema.rel_props, &selector.rel_type, selector.property.as_deref());
                format_block(rel_type, spec, options.include_types)
            })
            .collect();
        sections.push(section(
            &format!("Relevant relationship properties{} are:", with_types),
            &rel_lines,
        ));
    }

    Ok(sections.join("\n\n").trim().to_string())
}
