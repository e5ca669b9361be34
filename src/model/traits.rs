//! Core model traits
//!
//! This module defines the `InternalModel` trait implemented by every
//! parametric scalarizing function the constructors can sample and evolve.

use std::fmt::Debug;

use crate::error::ModelError;
use crate::model::normalization::Normalization;

/// Tolerance used when checking that weights lie on the simplex
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;

/// Parametric scalarizing function representing a decision maker's preferences.
///
/// A model is identified by a simplex-normalized weight vector (one component
/// per criterion) and an auxiliary scalar parameter such as the compensation
/// level of an L-norm. Models are immutable once evaluated; the only permitted
/// mutation is rebinding the normalizations when the objective space changes.
pub trait InternalModel: Clone + Debug + Send + Sync + 'static {
    /// Weight vector in declared criterion order
    fn weights(&self) -> &[f64];

    /// Auxiliary scalar parameter (`f64::INFINITY` for Chebyshev-like models)
    fn auxiliary(&self) -> f64;

    /// Score an alternative given by its raw criterion values
    fn evaluate(&self, point: &[f64]) -> f64;

    /// Whether lower scores denote more preferred alternatives
    fn is_less_preferred(&self) -> bool;

    /// Currently bound normalizations, if any
    fn normalizations(&self) -> Option<&[Normalization]>;

    /// Rebind the normalizations
    ///
    /// Any cached evaluation of this model becomes stale and must be
    /// recomputed by its owner.
    fn set_normalizations(&mut self, normalizations: Option<Vec<Normalization>>);

    /// Create a model of the same family with new weights.
    ///
    /// The auxiliary parameter and the normalizations are kept.
    fn with_weights(&self, weights: Vec<f64>) -> Result<Self, ModelError> {
        self.with_parameters(weights, self.auxiliary())
    }

    /// Create a model of the same family with new weights and auxiliary
    /// parameter. The normalizations are kept.
    fn with_parameters(&self, weights: Vec<f64>, auxiliary: f64) -> Result<Self, ModelError>;

    /// Number of criteria
    fn dimensions(&self) -> usize {
        self.weights().len()
    }

    /// Signed margin by which `a` is better than `b` under this model.
    ///
    /// Positive iff `a` is strictly preferred to `b`.
    fn preference_margin(&self, a: &[f64], b: &[f64]) -> f64 {
        let (ea, eb) = (self.evaluate(a), self.evaluate(b));
        if self.is_less_preferred() {
            eb - ea
        } else {
            ea - eb
        }
    }

    /// Whether `a` is strictly preferred to `b`
    fn is_better(&self, a: &[f64], b: &[f64]) -> bool {
        self.preference_margin(a, b) > 0.0
    }
}

/// Check that `weights` is a point of the simplex.
pub fn validate_simplex(weights: &[f64]) -> Result<(), ModelError> {
    if weights.is_empty() {
        return Err(ModelError::InvalidWeights(
            "weight vector is empty".to_string(),
        ));
    }
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(ModelError::InvalidWeights(format!(
            "weights must be finite and non-negative, found {}",
            w
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
        return Err(ModelError::InvalidWeights(format!(
            "weights must sum to 1, sum is {}",
            sum
        )));
    }
    Ok(())
}

/// Project a vector back onto the simplex.
///
/// Negative and non-finite components are clamped to zero and the rest is
/// rescaled to sum to one. A vector with no positive mass becomes uniform.
pub fn project_onto_simplex(weights: &mut [f64]) {
    for w in weights.iter_mut() {
        if !w.is_finite() || *w < 0.0 {
            *w = 0.0;
        }
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        let uniform = 1.0 / weights.len() as f64;
        weights.iter_mut().for_each(|w| *w = uniform);
    } else {
        weights.iter_mut().for_each(|w| *w /= sum);
    }
}
