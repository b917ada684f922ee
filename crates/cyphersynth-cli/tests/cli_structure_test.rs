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

//! Tests for the CLI argument structure.

use clap::{CommandFactory, Parser};
use cyphersynth_cli::cli::{Commands, DatasetCommands, InspectCommands};
use cyphersynth_cli::Cli;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_all_commands_available() {
    let cmd = Cli::command();
    let subcommands: Vec<_> = cmd.get_subcommands().map(|c| c.get_name()).collect();

    for name in ["schema", "datatypes", "subschema", "queries", "extract", "generate", "completion"] {
        assert!(subcommands.contains(&name), "missing {}", name);
    }
}

#[test]
fn test_schema_command_args() {
    assert!(Cli::try_parse_from(["cyphersynth", "schema", "graph.json"]).is_ok());
    assert!(Cli::try_parse_from(["cyphersynth", "schema", "graph.json", "--types", "--json"]).is_ok());
    assert!(Cli::try_parse_from(["cyphersynth", "schema"]).is_err());
}

#[test]
fn test_queries_snapshot_is_optional() {
    assert!(Cli::try_parse_from(["cyphersynth", "queries"]).is_ok());
    let cli = Cli::try_parse_from(["cyphersynth", "queries", "graph.json", "--node-limit", "5"]).unwrap();
    match cli.command {
        Commands::Inspect(InspectCommands::Queries {
            file,
            node_limit,
            relationship_limit,
        }) => {
            assert_eq!(file.as_deref(), Some("graph.json"));
            assert_eq!(node_limit, 5);
            assert_eq!(relationship_limit, cyphersynth_core::DEFAULT_RELATIONSHIP_LIMIT);
        }
        _ => panic!("expected queries command"),
    }
}

#[test]
fn test_datatypes_component_values() {
    assert!(Cli::try_parse_from(["cyphersynth", "datatypes", "graph.json", "-c", "relationship"]).is_ok());
    assert!(Cli::try_parse_from(["cyphersynth", "datatypes", "graph.json", "-c", "edge"]).is_err());
}

#[test]
fn test_subschema_selectors_repeat() {
    let cli = Cli::try_parse_from([
        "cyphersynth",
        "subschema",
        "graph.json",
        "--node",
        "Person.name",
        "-n",
        "Company",
        "--rel",
        "WORKS_AT",
        "--no-node-props",
        "--rel-props",
    ])
    .unwrap();

    match cli.command {
        Commands::Inspect(InspectCommands::Subschema {
            nodes,
            rels,
            no_node_props,
            rel_props,
            types,
            ..
        }) => {
            assert_eq!(nodes, vec!["Person.name", "Company"]);
            assert_eq!(rels, vec!["WORKS_AT"]);
            assert!(no_node_props);
            assert!(rel_props);
            assert!(!types);
        }
        _ => panic!("expected subschema command"),
    }
}

#[test]
fn test_extract_defaults() {
    let cli = Cli::try_parse_from(["cyphersynth", "extract", "graph.json"]).unwrap();
    match cli.command {
        Commands::Dataset(DatasetCommands::Extract {
            node_limit,
            relationship_limit,
            output,
            ..
        }) => {
            assert_eq!(node_limit, 10);
            assert_eq!(relationship_limit, 10);
            assert!(output.is_none());
        }
        _ => panic!("expected extract command"),
    }
}

#[test]
fn test_generate_requires_config() {
    assert!(Cli::try_parse_from(["cyphersynth", "generate", "graph.json"]).is_err());

    let cli = Cli::try_parse_from([
        "cyphersynth",
        "generate",
        "graph.json",
        "--config",
        "tasks.json",
        "--seed",
        "42",
        "-v",
    ])
    .unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Dataset(DatasetCommands::Generate { config, seed, .. }) => {
            assert_eq!(config, "tasks.json");
            assert_eq!(seed, Some(42));
        }
        _ => panic!("expected generate command"),
    }
}
