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

//! Malformed inputs for error handling tests.

/// Snapshot JSON texts that parse but fail later in the pipeline.
///
/// Each tuple contains (name, snapshot_json).
pub fn malformed_snapshots() -> Vec<(&'static str, &'static str)> {
    vec![
        ("missing_discovery", r#"{"nodes": {"Person": [{"name": "Ann"}]}}"#),
        (
            "node_group_without_label",
            r#"{"discovery": {"node_properties": [{"properties": []}]}}"#,
        ),
        (
            "properties_not_a_list",
            r#"{"discovery": {"node_properties": [{"label": "Person", "properties": "name"}]}}"#,
        ),
        (
            "property_without_datatype",
            r#"{"discovery": {"node_properties": [{"label": "Person", "properties": [{"property": "name"}]}]}}"#,
        ),
        (
            "relationship_without_end",
            r#"{"discovery": {"relationships": [{"start": "Person", "type": "KNOWS"}]}}"#,
        ),
        (
            "relationship_row_without_end",
            r#"{
                "discovery": {"relationships": [{"start": "Person", "type": "KNOWS", "end": "Person"}]},
                "relationships": [{"start": "Person", "type": "KNOWS", "end": "Person",
                                   "instances": [{"start": {}, "rel": {}}]}]
            }"#,
        ),
    ]
}

/// Texts that are not snapshots at all.
pub fn invalid_json_samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("truncated", r#"{"discovery": {"#),
        ("wrong_root", "[1, 2, 3]"),
        ("bad_date_tag", r#"{"nodes": {"Event": [{"day": {"$date": "2024-13-40"}}]}}"#),
    ]
}
