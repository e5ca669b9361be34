//! Weighted L-norm scalarizing function
//!
//! The score of an alternative is its weighted L-alpha distance from the
//! (normalized) origin, so lower scores are better. `alpha = +inf` yields the
//! weighted Chebyshev function.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::normalization::Normalization;
use crate::model::traits::{validate_simplex, InternalModel};

/// Weighted L-norm preference model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LNorm {
    /// Criterion weights (simplex normalized)
    weights: Vec<f64>,
    /// Compensation level
    #[serde(with = "compensation_level")]
    alpha: f64,
    /// Per-criterion normalizations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    normalizations: Option<Vec<Normalization>>,
}

impl LNorm {
    /// Create a new L-norm with the given weights and compensation level
    pub fn new(weights: Vec<f64>, alpha: f64) -> Result<Self, ModelError> {
        validate_simplex(&weights)?;
        if alpha.is_nan() || alpha <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "compensation level must be positive, got {}",
                alpha
            )));
        }
        Ok(Self {
            weights,
            alpha,
            normalizations: None,
        })
    }

    /// Assemble a model from parameters that are already validated
    pub(crate) fn from_parts(
        weights: Vec<f64>,
        alpha: f64,
        normalizations: Option<Vec<Normalization>>,
    ) -> Self {
        Self {
            weights,
            alpha,
            normalizations,
        }
    }

    /// Create a weighted Chebyshev function (`alpha = +inf`)
    pub fn chebyshev(weights: Vec<f64>) -> Result<Self, ModelError> {
        Self::new(weights, f64::INFINITY)
    }

    /// Attach normalizations
    pub fn with_normalizations(
        mut self,
        normalizations: Vec<Normalization>,
    ) -> Result<Self, ModelError> {
        check_normalizations(self.weights.len(), &normalizations)?;
        self.normalizations = Some(normalizations);
        Ok(self)
    }

    /// Compensation level
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether this is the Chebyshev variant
    pub fn is_chebyshev(&self) -> bool {
        self.alpha.is_infinite()
    }

    fn normalized(&self, i: usize, value: f64) -> f64 {
        match self.normalizations.as_ref().and_then(|n| n.get(i)) {
            Some(n) => n.normalize(value),
            None => value,
        }
    }
}

impl InternalModel for LNorm {
    fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn auxiliary(&self) -> f64 {
        self.alpha
    }

    fn evaluate(&self, point: &[f64]) -> f64 {
        let terms = self
            .weights
            .iter()
            .zip(point.iter())
            .enumerate()
            .map(|(i, (w, x))| w * self.normalized(i, *x).abs());

        if self.alpha.is_infinite() {
            terms.fold(0.0, f64::max)
        } else {
            terms.map(|t| t.powf(self.alpha)).sum::<f64>().powf(1.0 / self.alpha)
        }
    }

    fn is_less_preferred(&self) -> bool {
        true
    }

    fn normalizations(&self) -> Option<&[Normalization]> {
        self.normalizations.as_deref()
    }

    fn set_normalizations(&mut self, normalizations: Option<Vec<Normalization>>) {
        self.normalizations = normalizations;
    }

    fn with_parameters(&self, weights: Vec<f64>, auxiliary: f64) -> Result<Self, ModelError> {
        if weights.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                actual: weights.len(),
            });
        }
        let mut model = Self::new(weights, auxiliary)?;
        model.normalizations = self.normalizations.clone();
        Ok(model)
    }
}

pub(crate) fn check_normalizations(
    dimensions: usize,
    normalizations: &[Normalization],
) -> Result<(), ModelError> {
    if normalizations.len() != dimensions {
        return Err(ModelError::DimensionMismatch {
            expected: dimensions,
            actual: normalizations.len(),
        });
    }
    Ok(())
}

/// JSON has no infinity, so the Chebyshev level is stored as `null`.
mod compensation_level {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(alpha: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if alpha.is_infinite() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(alpha)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_chebyshev_evaluation() {
        let model = LNorm::chebyshev(vec![0.5, 0.5]).unwrap();
        assert_relative_eq!(model.evaluate(&[0.4, 0.4]), 0.2);
        assert_relative_eq!(model.evaluate(&[0.2, 0.7]), 0.35);
        assert!(model.is_better(&[0.4, 0.4], &[0.2, 0.7]));
        assert!(!model.is_better(&[0.2, 0.7], &[0.4, 0.4]));
    }

    #[test]
    fn test_linear_evaluation() {
        let model = LNorm::new(vec![0.25, 0.75], 1.0).unwrap();
        assert_relative_eq!(model.evaluate(&[1.0, 2.0]), 1.75);
    }

    #[test]
    fn test_euclidean_evaluation() {
        let model = LNorm::new(vec![0.5, 0.5], 2.0).unwrap();
        assert_relative_eq!(model.evaluate(&[6.0, 8.0]), 5.0);
    }

    #[test]
    fn test_normalized_evaluation() {
        let model = LNorm::new(vec![0.5, 0.5], 1.0)
            .unwrap()
            .with_normalizations(vec![
                Normalization::new(0.0, 10.0).unwrap(),
                Normalization::new(0.0, 2.0).unwrap(),
            ])
            .unwrap();
        assert_relative_eq!(model.evaluate(&[5.0, 1.0]), 0.5);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(LNorm::new(vec![0.3, 0.3], 1.0).is_err());
        assert!(LNorm::new(vec![0.5, 0.5], 0.0).is_err());
        assert!(LNorm::new(vec![0.5, 0.5], f64::NAN).is_err());
        let model = LNorm::new(vec![0.5, 0.5], 1.0).unwrap();
        assert!(model.with_normalizations(vec![Normalization::unit()]).is_err());
    }

    #[test]
    fn test_with_weights_keeps_parameters() {
        let model = LNorm::new(vec![0.5, 0.5], 3.0)
            .unwrap()
            .with_normalizations(vec![Normalization::unit(); 2])
            .unwrap();
        let child = model.with_weights(vec![0.1, 0.9]).unwrap();
        assert_eq!(child.alpha(), 3.0);
        assert_eq!(child.weights(), &[0.1, 0.9]);
        assert!(child.normalizations().is_some());
        assert!(model.with_weights(vec![1.0]).is_err());
    }

    #[test]
    fn test_with_parameters_replaces_alpha() {
        let template = LNorm::chebyshev(vec![0.5, 0.5])
            .unwrap()
            .with_normalizations(vec![Normalization::unit(); 2])
            .unwrap();
        let model = template.with_parameters(vec![0.25, 0.75], 4.0).unwrap();
        assert_eq!(model.alpha(), 4.0);
        assert_eq!(model.weights(), &[0.25, 0.75]);
        assert_eq!(model.normalizations(), template.normalizations());
        assert!(template.with_parameters(vec![0.25, 0.75], -1.0).is_err());
        assert!(template.with_parameters(vec![1.0], 4.0).is_err());
    }

    #[test]
    fn test_serde_roundtrip_chebyshev() {
        let model = LNorm::chebyshev(vec![0.3, 0.7]).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: LNorm = serde_json::from_str(&json).unwrap();
        assert_eq!(model, back);
        assert!(back.is_chebyshev());
    }
}
