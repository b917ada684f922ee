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

//! Key-based deduplication shared by every sample builder.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first item for each key, in input order.
///
/// ```
/// # use cyphersynth_core::sampler::dedupe_by_key;
/// let kept = dedupe_by_key(vec![("a", 1), ("b", 2), ("a", 3)], |(k, _)| *k);
/// assert_eq!(kept, vec![("a", 1), ("b", 2)]);
/// ```
pub fn dedupe_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

/// Pass `items` through unchanged when repeats are allowed, otherwise
/// [`dedupe_by_key`] them.
pub fn apply_repeat_policy<T, K, F>(items: impl IntoIterator<Item = T>, allow_repeats: bool, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    if allow_repeats {
        items.into_iter().collect()
    } else {
        dedupe_by_key(items, key)
    }
}
