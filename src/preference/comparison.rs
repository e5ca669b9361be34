//! Alternatives and pairwise comparisons

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::traits::InternalModel;

/// A point of the objective space shown to the decision maker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Display name
    pub name: String,
    /// Raw criterion values in declared criterion order
    pub criteria: Vec<f64>,
}

impl Alternative {
    /// Create a new alternative
    pub fn new(name: impl Into<String>, criteria: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            criteria,
        }
    }

    /// Number of criteria
    pub fn dimensions(&self) -> usize {
        self.criteria.len()
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.name, self.criteria)
    }
}

/// "`preferred` is strictly better than `not_preferred`"
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    /// The alternative the decision maker picked
    pub preferred: Alternative,
    /// The alternative the decision maker rejected
    pub not_preferred: Alternative,
}

impl PairwiseComparison {
    /// Create a new comparison
    pub fn new(preferred: Alternative, not_preferred: Alternative) -> Self {
        Self {
            preferred,
            not_preferred,
        }
    }

    /// Signed margin by which the model agrees with this comparison.
    ///
    /// Positive iff the model scores the preferred alternative strictly better.
    pub fn margin<M: InternalModel>(&self, model: &M) -> f64 {
        model.preference_margin(&self.preferred.criteria, &self.not_preferred.criteria)
    }

    /// Whether the model reproduces this comparison
    pub fn is_satisfied_by<M: InternalModel>(&self, model: &M) -> bool {
        self.margin(model) > 0.0
    }
}

impl fmt::Display for PairwiseComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.preferred, self.not_preferred)
    }
}

/// A unit of decision-maker feedback accepted into the history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreferenceInformationWrapper {
    /// Identifier assigned by the history
    pub id: usize,
    /// Decision-making iteration the feedback arrived in
    pub iteration: usize,
    /// The comparison itself
    pub preference: PairwiseComparison,
}

impl PreferenceInformationWrapper {
    /// Wrap a comparison
    pub fn new(id: usize, iteration: usize, preference: PairwiseComparison) -> Self {
        Self {
            id,
            iteration,
            preference,
        }
    }

    /// Number of criteria of the compared alternatives
    pub fn dimensions(&self) -> usize {
        self.preference.preferred.dimensions()
    }

    /// Check both alternatives have `expected` criteria
    pub fn has_dimensions(&self, expected: usize) -> bool {
        self.preference.preferred.dimensions() == expected
            && self.preference.not_preferred.dimensions() == expected
    }
}
