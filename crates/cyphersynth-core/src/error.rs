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

//! Error types for schema discovery, extraction and sample synthesis.

use thiserror::Error;

/// Error type for CypherSynth operations.
///
/// Filtering and sampling operations never fail: an empty selection is a
/// valid result. Errors come from the graph source (connectivity,
/// capability, query syntax), from malformed rows, and from subschema
/// rendering.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The graph source is unreachable or rejected the credentials.
    #[error("could not connect to graph source: {0}")]
    Connectivity(String),

    /// A capability required for schema discovery is unavailable.
    #[error("schema discovery unavailable: {0}")]
    Capability(String),

    /// The graph source rejected a statement.
    #[error("statement rejected by graph source: {message}\n{query}")]
    QuerySyntax {
        /// The rejected statement text.
        query: String,
        /// Diagnostic returned by the source.
        message: String,
    },

    /// A relationship type has no matching triple in the schema.
    #[error("no relationship triple with type '{0}' in schema")]
    Lookup(String),

    /// A discovery or instance row is missing a field or has the wrong shape.
    #[error("malformed {record} record: missing or invalid field '{field}'")]
    DataFormat {
        /// Which kind of record was being parsed.
        record: String,
        /// The offending field.
        field: String,
    },

    /// A prompt template could not be rendered.
    #[error("template error: {0}")]
    Template(String),

    /// Invalid Cypher identifier.
    #[error("invalid Cypher identifier: '{0}'")]
    InvalidIdentifier(String),

    /// File access failed while loading a snapshot.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path being accessed.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthError {
    /// Build a [`SynthError::DataFormat`] for a record kind and field.
    pub fn data_format(record: impl Into<String>, field: impl Into<String>) -> Self {
        SynthError::DataFormat {
            record: record.into(),
            field: field.into(),
        }
    }
}

/// Result type alias for CypherSynth operations.
pub type Result<T> = std::result::Result<T, SynthError>;
