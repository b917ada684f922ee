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

//! Schema inspection commands.

use crate::commands;
use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use cyphersynth_core::{
    Component, ExtractionConfig, SubschemaOptions, DEFAULT_NODE_LIMIT, DEFAULT_RELATIONSHIP_LIMIT,
};

/// Which half of the schema to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ComponentArg {
    /// Node properties
    Node,
    /// Relationship properties
    Relationship,
}

impl From<ComponentArg> for Component {
    fn from(arg: ComponentArg) -> Self {
        match arg {
            ComponentArg::Node => Component::Node,
            ComponentArg::Relationship => Component::Relationship,
        }
    }
}

/// Commands that read a snapshot's schema without generating data.
#[derive(Subcommand)]
pub enum InspectCommands {
    /// Describe the schema of a snapshot
    ///
    /// Prints node labels with their properties followed by every
    /// relationship triple.
    Schema {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: String,

        /// Show property datatypes
        #[arg(short, long)]
        types: bool,

        /// Print the normalized schema model as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the distinct property datatypes
    Datatypes {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: String,

        /// Schema component to inspect
        #[arg(short, long, value_enum, default_value = "node")]
        component: ComponentArg,
    },

    /// Render a subschema scoped to selected labels and relationship types
    ///
    /// Selectors take the form `Name` or `Name.property`.
    Subschema {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: String,

        /// Node selector (repeatable)
        #[arg(short, long = "node", value_name = "LABEL[.PROP]")]
        nodes: Vec<String>,

        /// Relationship selector (repeatable)
        #[arg(short, long = "rel", value_name = "TYPE[.PROP]")]
        rels: Vec<String>,

        /// List node labels without properties
        #[arg(long)]
        no_node_props: bool,

        /// Add the relationship properties section
        #[arg(long)]
        rel_props: bool,

        /// Show property datatypes
        #[arg(short, long)]
        types: bool,
    },

    /// Print the Cypher statements that capture a snapshot
    ///
    /// Without a snapshot only the schema discovery statements are printed;
    /// with one, the instance statements for its labels and triples follow.
    Queries {
        /// Snapshot file path
        #[arg(value_name = "SNAPSHOT")]
        file: Option<String>,

        /// Maximum instances per node label
        #[arg(long, default_value_t = DEFAULT_NODE_LIMIT)]
        node_limit: usize,

        /// Maximum instances per relationship triple
        #[arg(long, default_value_t = DEFAULT_RELATIONSHIP_LIMIT)]
        relationship_limit: usize,
    },
}

impl InspectCommands {
    /// Execute the inspection command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            InspectCommands::Schema { file, types, json } => commands::schema(&file, types, json),
            InspectCommands::Datatypes { file, component } => {
                commands::datatypes(&file, component.into())
            }
            InspectCommands::Subschema {
                file,
                nodes,
                rels,
                no_node_props,
                rel_props,
                types,
            } => {
                let options = SubschemaOptions {
                    include_node_props: !no_node_props,
                    include_rel_props: rel_props,
                    include_types: types,
                };
                commands::subschema(&file, &nodes, &rels, options)
            }
            InspectCommands::Queries {
                file,
                node_limit,
                relationship_limit,
            } => {
                let config = ExtractionConfig::builder()
                    .node_limit(node_limit)
                    .relationship_limit(relationship_limit)
                    .build();
                commands::queries(file.as_deref(), &config)
            }
        }
    }
}
