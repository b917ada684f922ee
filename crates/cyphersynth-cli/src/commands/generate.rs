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

//! Dataset commands - extract, generate

use super::{load_generation_config, load_snapshot, to_json, write_output};
use crate::error::CliError;
use colored::Colorize;
use cyphersynth_core::{generate_with_rng, Extraction, ExtractionConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Extract bounded instance samples from a snapshot and write them as JSON.
///
/// # Examples
///
/// ```no_run
/// use cyphersynth_cli::commands::extract;
/// use cyphersynth_core::ExtractionConfig;
///
/// # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
/// extract("snapshot.json", &ExtractionConfig::default(), Some("extraction.json"), true)?;
/// # Ok(())
/// # }
/// ```
pub fn extract(
    file: &str,
    config: &ExtractionConfig,
    output: Option<&str>,
    pretty: bool,
) -> Result<(), CliError> {
    let extraction = Extraction::run(&load_snapshot(file)?, config)?;
    write_output(&to_json(&extraction, pretty)?, output)?;

    if let Some(path) = output {
        println!(
            "{} {} ({} nodes, {} relationships)",
            "✓".green().bold(),
            path,
            extraction.node_count(),
            extraction.relationship_count()
        );
    }
    Ok(())
}

/// Run every task of a generation config against a snapshot and write the
/// records as a JSON array.
///
/// A `seed` makes down-sampling reproducible.
///
/// # Errors
///
/// Returns `Err` if either file cannot be read or parsed, extraction fails,
/// or a template references an unknown placeholder.
pub fn generate(
    file: &str,
    config_file: &str,
    output: Option<&str>,
    pretty: bool,
    seed: Option<u64>,
) -> Result<(), CliError> {
    let config = load_generation_config(config_file)?;
    if config.tasks.is_empty() {
        return Err(CliError::invalid_input(format!(
            "generation config '{}' defines no tasks",
            config_file
        )));
    }

    let extraction = Extraction::run(&load_snapshot(file)?, &config.extraction)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let records = generate_with_rng(&extraction, &config, &mut rng)?;

    write_output(&to_json(&records, pretty)?, output)?;

    if let Some(path) = output {
        println!("{} {} ({} records)", "✓".green().bold(), path, records.len());
    }
    Ok(())
}
