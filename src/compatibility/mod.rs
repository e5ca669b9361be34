//! Compatibility analysis
//!
//! A compatibility degree says how well a candidate model reproduces the
//! accumulated decision-maker feedback. Degrees are positive iff the model
//! satisfies every comparison; zero or negative degrees mark incompatible
//! models and order them by how close they are to becoming compatible.
//!
//! Analyzers always evaluate every feedback item, so the degree never depends
//! on the order in which the items are visited.

use crate::model::traits::InternalModel;
use crate::preference::comparison::PreferenceInformationWrapper;

/// Computes the compatibility degree of a model with the current feedback
pub trait CompatibilityAnalyzer<M: InternalModel>: Send + Sync {
    /// Compatibility degree of `model` with `feedback`
    fn compatibility(&self, model: &M, feedback: &[PreferenceInformationWrapper]) -> f64;

    /// Whether a degree marks a compatible model
    fn is_compatible(&self, degree: f64) -> bool {
        degree > 0.0
    }
}

/// Smallest score margin over all comparisons
///
/// The degree is the margin by which the model's least convincing comparison
/// is reproduced; a model discriminating more strongly between the compared
/// alternatives gets a higher degree. Empty feedback yields `+inf`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostDiscriminating;

impl MostDiscriminating {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }
}

impl<M: InternalModel> CompatibilityAnalyzer<M> for MostDiscriminating {
    fn compatibility(&self, model: &M, feedback: &[PreferenceInformationWrapper]) -> f64 {
        feedback
            .iter()
            .map(|item| item.preference.margin(model))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Fraction of satisfied comparisons
///
/// `1.0` when every comparison is reproduced, otherwise
/// `satisfied / total - 1.0`, which lies in `[-1, 0)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SatisfiedFraction;

impl SatisfiedFraction {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }
}

impl<M: InternalModel> CompatibilityAnalyzer<M> for SatisfiedFraction {
    fn compatibility(&self, model: &M, feedback: &[PreferenceInformationWrapper]) -> f64 {
        if feedback.is_empty() {
            return 1.0;
        }
        let satisfied = feedback
            .iter()
            .filter(|item| item.preference.is_satisfied_by(model))
            .count();
        let fraction = satisfied as f64 / feedback.len() as f64;
        if satisfied == feedback.len() {
            1.0
        } else {
            fraction - 1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lnorm::LNorm;
    use crate::preference::comparison::{Alternative, PairwiseComparison};
    use approx::assert_relative_eq;

    fn feedback() -> Vec<PreferenceInformationWrapper> {
        let pairs = [
            ([0.4, 0.4], [0.2, 0.7]),
            ([0.45, 0.35], [0.8, 0.1]),
            ([0.35, 0.45], [0.1, 0.8]),
        ];
        pairs
            .iter()
            .enumerate()
            .map(|(i, (a, b))| {
                PreferenceInformationWrapper::new(
                    i,
                    0,
                    PairwiseComparison::new(
                        Alternative::new("a", a.to_vec()),
                        Alternative::new("b", b.to_vec()),
                    ),
                )
            })
            .collect()
    }

    #[test]
    fn test_most_discriminating_compatible() {
        let model = LNorm::chebyshev(vec![0.5, 0.5]).unwrap();
        let degree = MostDiscriminating.compatibility(&model, &feedback());
        // margins: 0.35 - 0.2, 0.4 - 0.225, 0.4 - 0.225
        assert_relative_eq!(degree, 0.15, epsilon = 1e-12);
        assert!(CompatibilityAnalyzer::<LNorm>::is_compatible(
            &MostDiscriminating,
            degree
        ));
    }

    #[test]
    fn test_most_discriminating_incompatible() {
        let model = LNorm::chebyshev(vec![0.9, 0.1]).unwrap();
        let degree = MostDiscriminating.compatibility(&model, &feedback());
        assert!(degree < 0.0);
    }

    #[test]
    fn test_most_discriminating_empty_feedback() {
        let model = LNorm::chebyshev(vec![0.9, 0.1]).unwrap();
        assert_eq!(MostDiscriminating.compatibility(&model, &[]), f64::INFINITY);
    }

    #[test]
    fn test_satisfied_fraction() {
        let balanced = LNorm::chebyshev(vec![0.5, 0.5]).unwrap();
        assert_eq!(SatisfiedFraction.compatibility(&balanced, &feedback()), 1.0);

        // Violates the first and third comparisons, keeps the second.
        let skewed = LNorm::chebyshev(vec![0.9, 0.1]).unwrap();
        let degree = SatisfiedFraction.compatibility(&skewed, &feedback());
        assert_relative_eq!(degree, 1.0 / 3.0 - 1.0, epsilon = 1e-12);
        assert_eq!(SatisfiedFraction.compatibility(&skewed, &[]), 1.0);
    }
}
