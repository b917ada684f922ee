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

//! Schema inspection commands - schema, datatypes, subschema, queries

use super::{load_snapshot, to_json, write_output};
use crate::error::CliError;
use cyphersynth_core::cypher::{
    node_instances_query, node_properties_query, relationship_instances_query,
    relationship_properties_query, relationships_query,
};
use cyphersynth_core::{
    build_schema, render_subschema, Component, CypherStatement, ExtractionConfig, NodeSelector,
    RelSelector, SubschemaOptions,
};
use std::collections::HashSet;

/// Print the schema of a snapshot.
///
/// With `json` the normalized schema model is printed as JSON; otherwise the
/// text description, with datatypes when `types` is set.
///
/// # Errors
///
/// Returns `Err` if the snapshot cannot be read or carries no valid
/// discovery payload.
///
/// # Examples
///
/// ```no_run
/// use cyphersynth_cli::commands::schema;
///
/// # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
/// schema("snapshot.json", true, false)?;
/// # Ok(())
/// # }
/// ```
pub fn schema(file: &str, types: bool, json: bool) -> Result<(), CliError> {
    let schema = build_schema(&load_snapshot(file)?)?;

    let output = if json {
        to_json(&schema, true)?
    } else {
        format!("{}\n", schema.describe(types))
    };
    write_output(&output, None)
}

/// Print the distinct datatypes of one half of the schema, one per line.
pub fn datatypes(file: &str, component: Component) -> Result<(), CliError> {
    let schema = build_schema(&load_snapshot(file)?)?;

    let mut output = String::new();
    for datatype in schema.datatypes(component) {
        output.push_str(&datatype);
        output.push('\n');
    }
    write_output(&output, None)
}

/// Render the subschema for `Label[.property]` and `TYPE[.property]`
/// selectors.
///
/// # Errors
///
/// Returns `Err` if a selector is malformed or a relationship type has no
/// triple in the schema.
pub fn subschema(
    file: &str,
    nodes: &[String],
    rels: &[String],
    options: SubschemaOptions,
) -> Result<(), CliError> {
    let nodes = nodes
        .iter()
        .map(|s| s.parse::<NodeSelector>())
        .collect::<Result<Vec<_>, _>>()?;
    let rels = rels
        .iter()
        .map(|s| s.parse::<RelSelector>())
        .collect::<Result<Vec<_>, _>>()?;

    let schema = build_schema(&load_snapshot(file)?)?;
    let text = render_subschema(&schema, &nodes, &rels, options)?;
    write_output(&format!("{}\n", text), None)
}

/// Print the Cypher statements that capture a snapshot from a live graph.
///
/// The discovery statements are always printed. Given a snapshot, the
/// instance statements for each of its labels and distinct triples follow,
/// with limits inlined.
///
/// # Examples
///
/// ```no_run
/// use cyphersynth_cli::commands::queries;
/// use cyphersynth_core::ExtractionConfig;
///
/// # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
/// queries(None, &ExtractionConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub fn queries(file: Option<&str>, config: &ExtractionConfig) -> Result<(), CliError> {
    let mut statements: Vec<CypherStatement> = vec![
        node_properties_query(),
        relationship_properties_query(),
        relationships_query(),
    ];

    if let Some(file) = file {
        let schema = build_schema(&load_snapshot(file)?)?;
        for label in schema.labels() {
            statements.push(
                node_instances_query(&label, config.node_limit)
                    .with_comment(format!("{} instances", label)),
            );
        }
        let mut seen = HashSet::new();
        for spec in schema.relationships().iter().filter(|spec| seen.insert(*spec)) {
            statements.push(
                relationship_instances_query(spec, config.relationship_limit)
                    .with_comment(format!("{} instances", spec.pattern())),
            );
        }
    }

    let output: Vec<String> = statements.iter().map(|s| s.format(true)).collect();
    write_output(&format!("{}\n", output.join("\n\n")), None)
}
