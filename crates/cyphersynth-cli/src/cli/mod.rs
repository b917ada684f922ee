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

//! CLI command definitions and argument parsing.
//!
//! Commands are organized into the following modules:
//!
//! - [`inspect`]: Schema inspection (schema, datatypes, subschema, queries)
//! - [`dataset`]: Dataset production (extract, generate)
//! - [`utility`]: Utility commands (completion)

mod dataset;
mod inspect;
mod utility;

use crate::error::CliError;
use clap::Subcommand;

pub use dataset::DatasetCommands;
pub use inspect::{ComponentArg, InspectCommands};
pub use utility::UtilityCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Inspect (schema, datatypes, subschema, queries)
/// ├── Dataset (extract, generate)
/// └── Utility (completion)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use cyphersynth_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Inspection commands - flattened to appear at top level
    #[command(flatten)]
    Inspect(InspectCommands),

    // Dataset commands - flattened to appear at top level
    #[command(flatten)]
    Dataset(DatasetCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command with the provided arguments.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Inspect(cmd) => cmd.execute(),
            Commands::Dataset(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
