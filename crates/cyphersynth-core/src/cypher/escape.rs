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

//! Escaping of labels, relationship types, property keys and string values.
//!
//! Labels and property names come straight from schema discovery, so they
//! are escaped before being spliced into extraction statements or into the
//! Cypher half of a training record.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

fn escape_char(c: char) -> Option<&'static str> {
    Some(match c {
        '\\' => "\\\\",
        '\'' => "\\'",
        '"' => "\\\"",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        '\0' => "\\u0000",
        _ => return None,
    })
}

/// Escape a string value for use inside a quoted Cypher literal.
///
/// Clean input is returned borrowed.
///
/// ```
/// # use cyphersynth_core::cypher::escape_string;
/// assert_eq!(escape_string("Acme"), "Acme");
/// assert_eq!(escape_string("O'Brien"), "O\\'Brien");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(|c: char| escape_char(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut escaped = String::with_capacity(s.len() + 8);
    escaped.push_str(&s[..first]);
    for c in s[first..].chars() {
        match escape_char(c) {
            Some(replacement) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Whether `s` can be used unquoted: a letter or underscore followed by
/// letters, digits and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Normalize to Unicode NFC so that composed and decomposed spellings of
/// the same label compare equal.
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Zero-width, soft-hyphen and bidirectional formatting characters that
/// render invisibly in a label.
const INVISIBLE: &[char] = &[
    '\u{00AD}', '\u{061C}', '\u{180E}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{202A}',
    '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}', '\u{2066}', '\u{2067}', '\u{2068}',
    '\u{2069}', '\u{FEFF}',
];

/// Reserved words that must be backtick-quoted when used as names.
const KEYWORDS: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "ASCENDING", "BY", "CALL", "CASE", "CONTAINS", "COUNT",
    "CREATE", "DELETE", "DESC", "DESCENDING", "DETACH", "DISTINCT", "DO", "DROP", "ELSE", "END",
    "ENDS", "EXISTS", "FALSE", "FILTER", "FOREACH", "IN", "IS", "LIMIT", "MANDATORY", "MATCH",
    "MERGE", "NODE", "NONE", "NOT", "NULL", "OF", "ON", "OPTIONAL", "OR", "ORDER", "REDUCE",
    "RELATIONSHIP", "REMOVE", "RETURN", "SET", "SINGLE", "SKIP", "SOME", "STARTS", "THEN", "TRUE",
    "UNION", "UNIQUE", "UNWIND", "USING", "WHEN", "WHERE", "WITH", "XOR", "YIELD",
];

fn is_cypher_keyword(s: &str) -> bool {
    let upper = s.to_ascii_uppercase();
    KEYWORDS.contains(&upper.as_str())
}

/// NFC-normalize, strip control and invisible characters, then
/// backtick-quote unless the result is a plain non-keyword identifier.
fn sanitize(s: &str) -> String {
    let sanitized: String = normalize_unicode(s)
        .chars()
        .filter(|c| !c.is_control() && !INVISIBLE.contains(c))
        .collect();

    if is_valid_identifier(&sanitized) && !is_cypher_keyword(&sanitized) {
        sanitized
    } else {
        format!("`{}`", sanitized.replace('`', "``"))
    }
}

/// Escape a property key or variable name.
///
/// ```
/// # use cyphersynth_core::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// assert_eq!(escape_identifier("MATCH"), "`MATCH`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    sanitize(s)
}

/// Escape a node label, including the leading colon.
///
/// ```
/// # use cyphersynth_core::cypher::escape_label;
/// assert_eq!(escape_label("Person"), ":Person");
/// assert_eq!(escape_label("Movie Star"), ":`Movie Star`");
/// ```
pub fn escape_label(s: &str) -> String {
    format!(":{}", sanitize(s))
}

/// Escape a relationship type, including the leading colon.
///
/// ```
/// # use cyphersynth_core::cypher::escape_relationship_type;
/// assert_eq!(escape_relationship_type("WORKS_AT"), ":WORKS_AT");
/// assert_eq!(escape_relationship_type("works-at"), ":`works-at`");
/// ```
pub fn escape_relationship_type(s: &str) -> String {
    format!(":{}", sanitize(s))
}
