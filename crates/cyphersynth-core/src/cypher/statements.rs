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

//! Parameterized Cypher statements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::PropertyValue;

/// A Cypher statement with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CypherStatement {
    /// The query text, with `$name` parameter placeholders.
    pub query: String,
    /// Parameter values by name.
    #[serde(default)]
    pub parameters: BTreeMap<String, PropertyValue>,
    /// Optional comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl CypherStatement {
    /// Create a statement without parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: BTreeMap::new(),
            comment: None,
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Add a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether the statement carries parameters.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Substitute every parameter with its Cypher literal.
    ///
    /// Longer names are substituted first so `$limit` never clobbers
    /// `$limit_end`.
    pub fn render_inline(&self) -> String {
        let mut names: Vec<&String> = self.parameters.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut result = self.query.clone();
        for name in names {
            let placeholder = format!("${}", name);
            result = result.replace(&placeholder, &self.parameters[name].to_cypher_literal());
        }
        result
    }

    /// Render with the parameters inlined, a trailing semicolon and, if
    /// requested, the comment on the line above.
    pub fn format(&self, include_comment: bool) -> String {
        let rendered = format!("{};", self.render_inline());
        match (&self.comment, include_comment) {
            (Some(comment), true) => format!("// {}\n{}", comment, rendered),
            _ => rendered,
        }
    }
}
