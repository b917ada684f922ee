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

//! Expansion of filtered tuples into training records.
//!
//! Each builder deduplicates its input (unless repeats are allowed), expands
//! it into samples and hands every sample to a [`Prompter`]. The records the
//! prompter returns are passed through untouched. [`collect_samples`] then
//! caps the number of records per task.

mod builders;
mod dedupe;
mod samples;

pub use builders::{
    build_label_pairs_sampler, build_node_pair_sampler, build_node_sampler,
    build_relationship_sampler, build_relationship_with_props_sampler, pair_properties,
};
pub use dedupe::{apply_repeat_policy, dedupe_by_key};
pub use samples::{
    LabelPairSample, NodePairSample, NodeSample, Prompter, RelationshipPropsSample,
    RelationshipSample,
};

use rand::seq::index;
use rand::Rng;
use tracing::debug;

/// Keep at most `max` records, chosen uniformly at random without
/// replacement when there are more.
pub fn collect_samples<T>(samples: Vec<T>, max: usize) -> Vec<T> {
    collect_samples_with_rng(samples, max, &mut rand::thread_rng())
}

/// [`collect_samples`] with an explicit random source.
///
/// Selected records keep their relative input order.
pub fn collect_samples_with_rng<T, R>(samples: Vec<T>, max: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    let len = samples.len();
    if len <= max {
        return samples;
    }

    let mut keep = vec![false; len];
    for i in index::sample(rng, len, max).iter() {
        keep[i] = true;
    }
    debug!(available = len, kept = max, "down-sampled records");

    samples
        .into_iter()
        .zip(keep)
        .filter_map(|(sample, keep)| keep.then_some(sample))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_collect_samples_identity_when_small() {
        let samples = vec![3, 1, 2];
        assert_eq!(collect_samples(samples.clone(), 3), samples);
        assert_eq!(collect_samples(samples.clone(), 10), samples);
    }

    #[test]
    fn test_collect_samples_down_samples() {
        let samples: Vec<u32> = (0..50).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let kept = collect_samples_with_rng(samples, 10, &mut rng);

        assert_eq!(kept.len(), 10);
        let distinct: HashSet<_> = kept.iter().collect();
        assert_eq!(distinct.len(), 10);
        assert!(kept.iter().all(|v| *v < 50));
    }

    #[test]
    fn test_collect_samples_zero() {
        assert!(collect_samples(vec!["a", "b"], 0).is_empty());
    }
}
