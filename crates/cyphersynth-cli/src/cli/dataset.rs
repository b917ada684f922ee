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

//! Dataset production commands.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;
use cyphersynth_core::{ExtractionConfig, DEFAULT_NODE_LIMIT, DEFAULT_RELATIONSHIP_LIMIT};

/// Commands that sample instances and produce training records.
#[derive(Subcommand)]
pub enum DatasetCommands {
    /// Extract bounded instance samples as JSON
    Extract {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: String,

        /// Maximum instances per node label
        #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
        node_limit: usize,

        /// Maximum instances per relationship triple
        #[arg(long, default_value_t = DEFAULT_RELATIONSHIP_LIMIT)]
        relationship_limit: usize,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Generate training records from a generation config
    ///
    /// Runs every task of the config against the snapshot and writes the
    /// records as a JSON array of {Prompt, Question, Schema, Cypher}.
    Generate {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: String,

        /// Generation config file path
        #[arg(short, long, value_name = "FILE")]
        config: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Seed for reproducible down-sampling
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl DatasetCommands {
    /// Execute the dataset command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            DatasetCommands::Extract {
                file,
                node_limit,
                relationship_limit,
                output,
                pretty,
            } => {
                let config = ExtractionConfig::builder()
                    .node_limit(node_limit)
                    .relationship_limit(relationship_limit)
                    .build();
                commands::extract(&file, &config, output.as_deref(), pretty)
            }
            DatasetCommands::Generate {
                file,
                config,
                output,
                pretty,
                seed,
            } => commands::generate(&file, &config, output.as_deref(), pretty, seed),
        }
    }
}
