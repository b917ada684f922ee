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

//! CLI command implementations

mod completion;
mod generate;
mod inspect;

pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use generate::{extract, generate};
pub use inspect::{datatypes, queries, schema, subschema};

use crate::error::CliError;
use cyphersynth_core::{GenerationConfig, SnapshotSource};
use std::fs;
use std::io::{self, Write};

/// Default maximum file size to prevent OOM attacks (1 GB)
/// Can be overridden via CYPHERSYNTH_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Get the maximum file size from environment or use default.
///
/// Falls back to [`DEFAULT_MAX_FILE_SIZE`] if the variable is not set or
/// contains an invalid value.
fn get_max_file_size() -> u64 {
    std::env::var("CYPHERSYNTH_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Reject files larger than the configured maximum before they are read.
///
/// # Errors
///
/// Returns `Err` if:
/// - The file metadata cannot be accessed
/// - The file size exceeds the maximum allowed size (configurable via `CYPHERSYNTH_MAX_FILE_SIZE`)
///
/// # Examples
///
/// ```no_run
/// use cyphersynth_cli::commands::check_file_size;
///
/// # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
/// check_file_size("snapshot.json")?;
/// # Ok(())
/// # }
/// ```
pub fn check_file_size(path: &str) -> Result<(), CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }
    Ok(())
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &str) -> Result<SnapshotSource, CliError> {
    check_file_size(path)?;
    Ok(SnapshotSource::from_path(path)?)
}

/// Read and parse a generation config file.
pub fn load_generation_config(path: &str) -> Result<GenerationConfig, CliError> {
    check_file_size(path)?;
    Ok(GenerationConfig::from_path(path)?)
}

/// Serialize a value as JSON, compact or pretty.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}

/// Write content to a file or stdout.
///
/// # Examples
///
/// ```no_run
/// use cyphersynth_cli::commands::write_output;
///
/// # fn main() -> Result<(), cyphersynth_cli::error::CliError> {
/// write_output("[]\n", None)?;
/// write_output("[]\n", Some("records.json"))?;
/// # Ok(())
/// # }
/// ```
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), CliError> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| CliError::io_error("<stdout>", e)),
    }
}
