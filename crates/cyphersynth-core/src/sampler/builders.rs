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

//! Sample builders: dedupe, expand into samples, format.

use super::dedupe::apply_repeat_policy;
use super::samples::{
    LabelPairSample, NodePairSample, NodeSample, Prompter, RelationshipPropsSample,
    RelationshipSample,
};
use crate::filter::{NodeTuple, RelationshipPropsTuple, RelationshipTuple};

/// One record per node tuple.
///
/// Without repeats only the first tuple of each `(label, property)` is
/// kept, whatever its value.
pub fn build_node_sampler<P>(tuples: &[NodeTuple], prompter: &P, allow_repeats: bool) -> Vec<P::Record>
where
    P: Prompter<NodeSample> + ?Sized,
{
    apply_repeat_policy(tuples, allow_repeats, |t| (t.label.clone(), t.property.clone()))
        .into_iter()
        .map(|t| {
            prompter.format(&NodeSample {
                label: t.label.clone(),
                property: t.property.clone(),
                value: t.value.clone(),
            })
        })
        .collect()
}

/// The cross-product `a × b`, first-major.
///
/// With `same_node` only pairs sharing a label survive. Without repeats
/// only the first pair of each `(label_a, prop_a, label_b, prop_b)` is kept.
pub fn pair_properties<'a>(
    a: &'a [NodeTuple],
    b: &'a [NodeTuple],
    same_node: bool,
    allow_repeats: bool,
) -> Vec<(&'a NodeTuple, &'a NodeTuple)> {
    let product = a
        .iter()
        .flat_map(|x| b.iter().map(move |y| (x, y)))
        .filter(|(x, y)| !same_node || x.label == y.label);

    apply_repeat_policy(product, allow_repeats, |(x, y)| {
        (
            x.label.clone(),
            x.property.clone(),
            y.label.clone(),
            y.property.clone(),
        )
    })
}

/// One record per pair from [`pair_properties`].
///
/// With `same_node` the prompter receives [`NodePairSample::SameLabel`],
/// otherwise [`NodePairSample::DistinctLabels`].
pub fn build_node_pair_sampler<P>(
    a: &[NodeTuple],
    b: &[NodeTuple],
    prompter: &P,
    same_node: bool,
    allow_repeats: bool,
) -> Vec<P::Record>
where
    P: Prompter<NodePairSample> + ?Sized,
{
    pair_properties(a, b, same_node, allow_repeats)
        .into_iter()
        .map(|(x, y)| {
            let sample = if same_node {
                NodePairSample::SameLabel {
                    label: x.label.clone(),
                    first_property: x.property.clone(),
                    first_value: x.value.clone(),
                    second_property: y.property.clone(),
                    second_value: y.value.clone(),
                }
            } else {
                NodePairSample::DistinctLabels {
                    first_label: x.label.clone(),
                    first_property: x.property.clone(),
                    first_value: x.value.clone(),
                    second_label: y.label.clone(),
                    second_property: y.property.clone(),
                    second_value: y.value.clone(),
                }
            };
            prompter.format(&sample)
        })
        .collect()
}

/// One record per ordered label pair, self pairs included.
pub fn build_label_pairs_sampler<L, P>(labels: &[L], prompter: &P, allow_repeats: bool) -> Vec<P::Record>
where
    L: AsRef<str>,
    P: Prompter<LabelPairSample> + ?Sized,
{
    let product = labels
        .iter()
        .flat_map(|x| labels.iter().map(move |y| (x.as_ref(), y.as_ref())));

    apply_repeat_policy(product, allow_repeats, |pair| *pair)
        .into_iter()
        .map(|(first, second)| {
            prompter.format(&LabelPairSample {
                first: first.to_string(),
                second: second.to_string(),
            })
        })
        .collect()
}

/// One record per start-property × end-property combination of each tuple.
///
/// Without repeats only the first tuple of each `(start, type, end)` triple
/// is expanded.
pub fn build_relationship_sampler<P>(
    tuples: &[RelationshipTuple],
    prompter: &P,
    allow_repeats: bool,
) -> Vec<P::Record>
where
    P: Prompter<RelationshipSample> + ?Sized,
{
    let kept = apply_repeat_policy(tuples, allow_repeats, |t| {
        (t.start_label.clone(), t.rel_type.clone(), t.end_label.clone())
    });

    let mut records = Vec::new();
    for t in kept {
        for (start_property, start_value) in &t.start {
            for (end_property, end_value) in &t.end {
                records.push(prompter.format(&RelationshipSample {
                    start_label: t.start_label.clone(),
                    start_property: start_property.clone(),
                    start_value: start_value.clone(),
                    rel_type: t.rel_type.clone(),
                    end_label: t.end_label.clone(),
                    end_property: end_property.clone(),
                    end_value: end_value.clone(),
                }));
            }
        }
    }
    records
}

/// One record per start × relationship × end property combination of each
/// tuple.
///
/// Without repeats only the first tuple of each `(start, type, end)` triple
/// is expanded.
pub fn build_relationship_with_props_sampler<P>(
    tuples: &[RelationshipPropsTuple],
    prompter: &P,
    allow_repeats: bool,
) -> Vec<P::Record>
where
    P: Prompter<RelationshipPropsSample> + ?Sized,
{
    let kept = apply_repeat_policy(tuples, allow_repeats, |t| {
        (t.start_label.clone(), t.rel_type.clone(), t.end_label.clone())
    });

    let mut records = Vec::new();
    for t in kept {
        for (start_property, start_value) in &t.start {
            for (rel_property, rel_value) in &t.rel {
                for (end_property, end_value) in &t.end {
                    records.push(prompter.format(&RelationshipPropsSample {
                        start_label: t.start_label.clone(),
                        start_property: start_property.clone(),
                        start_value: start_value.clone(),
                        rel_type: t.rel_type.clone(),
                        rel_property: rel_property.clone(),
                        rel_value: rel_value.clone(),
                        end_label: t.end_label.clone(),
                        end_property: end_property.clone(),
                        end_value: end_value.clone(),
                    }));
                }
            }
        }
    }
    records
}
