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

//! Sample shapes handed to prompters, and the prompter capability.

use serde::{Deserialize, Serialize};

use crate::value::PropertyValue;

/// Turns one sample into one output record.
///
/// The builders never look inside the record. Closures taking `&S`
/// implement this trait.
///
/// ```
/// # use cyphersynth_core::sampler::{LabelPairSample, Prompter};
/// let prompter = |s: &LabelPairSample| format!("{} and {}", s.first, s.second);
/// let sample = LabelPairSample { first: "A".into(), second: "B".into() };
/// assert_eq!(prompter.format(&sample), "A and B");
/// ```
pub trait Prompter<S> {
    /// What the prompter produces.
    type Record;

    /// Format one sample.
    fn format(&self, sample: &S) -> Self::Record;
}

impl<S, R, F> Prompter<S> for F
where
    F: Fn(&S) -> R,
{
    type Record = R;

    fn format(&self, sample: &S) -> R {
        self(sample)
    }
}

/// One property value of one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSample {
    /// Node label.
    pub label: String,
    /// Property name.
    pub property: String,
    /// Property value.
    pub value: PropertyValue,
}

/// Two property values, on one label or on two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodePairSample {
    /// Both properties belong to the same label.
    SameLabel {
        /// Shared label.
        label: String,
        /// First property.
        first_property: String,
        /// First value.
        first_value: PropertyValue,
        /// Second property.
        second_property: String,
        /// Second value.
        second_value: PropertyValue,
    },
    /// The properties may belong to different labels.
    DistinctLabels {
        /// First label.
        first_label: String,
        /// First property.
        first_property: String,
        /// First value.
        first_value: PropertyValue,
        /// Second label.
        second_label: String,
        /// Second property.
        second_property: String,
        /// Second value.
        second_value: PropertyValue,
    },
}

impl NodePairSample {
    /// Label of the first property.
    pub fn first_label(&self) -> &str {
        match self {
            NodePairSample::SameLabel { label, .. } => label,
            NodePairSample::DistinctLabels { first_label, .. } => first_label,
        }
    }

    /// Label of the second property.
    pub fn second_label(&self) -> &str {
        match self {
            NodePairSample::SameLabel { label, .. } => label,
            NodePairSample::DistinctLabels { second_label, .. } => second_label,
        }
    }
}

/// Two labels, possibly equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPairSample {
    /// First label.
    pub first: String,
    /// Second label.
    pub second: String,
}

/// A start property and an end property around one relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSample {
    /// Start node label.
    pub start_label: String,
    /// Start node property.
    pub start_property: String,
    /// Start node value.
    pub start_value: PropertyValue,
    /// Relationship type.
    pub rel_type: String,
    /// End node label.
    pub end_label: String,
    /// End node property.
    pub end_property: String,
    /// End node value.
    pub end_value: PropertyValue,
}

/// A start property, a relationship property and an end property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPropsSample {
    /// Start node label.
    pub start_label: String,
    /// Start node property.
    pub start_property: String,
    /// Start node value.
    pub start_value: PropertyValue,
    /// Relationship type.
    pub rel_type: String,
    /// Relationship property.
    pub rel_property: String,
    /// Relationship value.
    pub rel_value: PropertyValue,
    /// End node label.
    pub end_label: String,
    /// End node property.
    pub end_property: String,
    /// End node value.
    pub end_value: PropertyValue,
}
