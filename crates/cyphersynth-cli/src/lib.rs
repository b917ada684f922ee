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

//! CypherSynth CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Schema Inspection
//!
//! - **schema**: Describe the schema of a snapshot
//! - **datatypes**: List distinct node or relationship property datatypes
//! - **subschema**: Render a subschema for selected labels and types
//! - **queries**: Print the Cypher statements that capture a snapshot
//!
//! ## Dataset Production
//!
//! - **extract**: Sample node and relationship instances as JSON
//! - **generate**: Produce `{Prompt, Question, Schema, Cypher}` records
//!
//! ## Utilities
//!
//! - **completion**: Generate shell completion scripts
//!
//! # Examples
//!
//! ```no_run
//! use cyphersynth_cli::commands::{generate, subschema};
//! use cyphersynth_core::SubschemaOptions;
//!
//! # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
//! subschema(
//!     "snapshot.json",
//!     &["Person.name".to_string()],
//!     &["WORKS_AT".to_string()],
//!     SubschemaOptions::new().with_types(),
//! )?;
//!
//! generate("snapshot.json", "generation.json", Some("records.json"), true, Some(42))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Input files larger than `CYPHERSYNTH_MAX_FILE_SIZE` bytes (default 1 GB)
//! are rejected before reading.

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod error;

/// CypherSynth - synthesize Cypher training data from a property graph
///
/// # Examples
///
/// ```bash
/// # Describe a snapshot's schema with datatypes
/// cyphersynth schema graph.json --types
///
/// # Render a subschema
/// cyphersynth subschema graph.json --node Person.name --rel WORKS_AT --types
///
/// # Generate a dataset
/// cyphersynth generate graph.json --config tasks.json -o records.json --pretty
/// ```
#[derive(Parser)]
#[command(name = "cyphersynth")]
#[command(author, version, about = "CypherSynth - Schema-driven Cypher training data synthesis", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: cli::Commands,
}
