//! Random model generators
//!
//! Generators draw fresh candidate models for rejection sampling. Weight
//! vectors are drawn uniformly over the simplex.

use rand::RngCore;
use rand_distr::{Distribution, Exp1};

use crate::error::ModelError;
use crate::model::lnorm::{check_normalizations, LNorm};
use crate::model::normalization::Normalization;
use crate::model::traits::InternalModel;

/// Produces random model instances
pub trait ModelGenerator<M: InternalModel>: Send + Sync {
    /// Draw a new random model
    fn generate_model(&self, rng: &mut dyn RngCore) -> M;

    /// Rebind the normalizations given to generated models
    fn set_normalizations(&mut self, normalizations: Option<Vec<Normalization>>);

    /// Normalizations currently given to generated models
    fn normalizations(&self) -> Option<&[Normalization]>;

    /// Number of criteria of generated models
    fn dimensions(&self) -> usize;
}

/// Draw a weight vector uniformly from the simplex.
///
/// Uses normalized i.i.d. exponential draws (a flat Dirichlet sample).
pub fn random_simplex_weights(dimensions: usize, rng: &mut dyn RngCore) -> Vec<f64> {
    let mut weights: Vec<f64> = (0..dimensions)
        .map(|_| -> f64 { Exp1.sample(&mut *rng) })
        .collect();
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.iter_mut().for_each(|w| *w /= sum);
    } else {
        let uniform = 1.0 / dimensions as f64;
        weights.iter_mut().for_each(|w| *w = uniform);
    }
    weights
}

/// Generator of weighted L-norms with a fixed compensation level
#[derive(Clone, Debug)]
pub struct LNormGenerator {
    dimensions: usize,
    alpha: f64,
    normalizations: Option<Vec<Normalization>>,
}

impl LNormGenerator {
    /// Create a new generator
    pub fn new(dimensions: usize, alpha: f64) -> Result<Self, ModelError> {
        if dimensions == 0 {
            return Err(ModelError::InvalidParameter(
                "generator needs at least one criterion".to_string(),
            ));
        }
        if alpha.is_nan() || alpha <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "compensation level must be positive, got {}",
                alpha
            )));
        }
        Ok(Self {
            dimensions,
            alpha,
            normalizations: None,
        })
    }

    /// Create a generator of weighted Chebyshev functions
    pub fn chebyshev(dimensions: usize) -> Result<Self, ModelError> {
        Self::new(dimensions, f64::INFINITY)
    }

    /// Attach normalizations given to every generated model
    pub fn with_normalizations(
        mut self,
        normalizations: Vec<Normalization>,
    ) -> Result<Self, ModelError> {
        check_normalizations(self.dimensions, &normalizations)?;
        self.normalizations = Some(normalizations);
        Ok(self)
    }

    /// Compensation level of generated models
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ModelGenerator<LNorm> for LNormGenerator {
    fn generate_model(&self, rng: &mut dyn RngCore) -> LNorm {
        let weights = random_simplex_weights(self.dimensions, rng);
        LNorm::from_parts(weights, self.alpha, self.normalizations.clone())
    }

    fn set_normalizations(&mut self, normalizations: Option<Vec<Normalization>>) {
        self.normalizations = normalizations;
    }

    fn normalizations(&self) -> Option<&[Normalization]> {
        self.normalizations.as_deref()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_simplex_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        for dim in 1..8 {
            let w = random_simplex_weights(dim, &mut rng);
            assert_eq!(w.len(), dim);
            assert!(w.iter().all(|&x| x >= 0.0));
            assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_simplex_marginal_mean() {
        // A flat Dirichlet has marginal mean 1/d.
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 20_000;
        let mean = (0..trials)
            .map(|_| random_simplex_weights(4, &mut rng)[0])
            .sum::<f64>()
            / trials as f64;
        assert_relative_eq!(mean, 0.25, epsilon = 0.01);
    }

    #[test]
    fn test_generator_produces_valid_models() {
        let mut rng = StdRng::seed_from_u64(3);
        let generator = LNormGenerator::chebyshev(3).unwrap();
        for _ in 0..50 {
            let model = generator.generate_model(&mut rng);
            assert_eq!(model.dimensions(), 3);
            assert!(model.is_chebyshev());
        }
    }

    #[test]
    fn test_generator_normalizations_rebinding() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut generator = LNormGenerator::new(2, 1.0).unwrap();
        assert!(generator.generate_model(&mut rng).normalizations().is_none());

        let norms = vec![Normalization::new(0.0, 4.0).unwrap(); 2];
        generator.set_normalizations(Some(norms.clone()));
        let model = generator.generate_model(&mut rng);
        assert_eq!(model.normalizations(), Some(norms.as_slice()));
    }

    #[test]
    fn test_generator_rejects_bad_parameters() {
        assert!(LNormGenerator::new(0, 1.0).is_err());
        assert!(LNormGenerator::new(2, -1.0).is_err());
        assert!(LNormGenerator::new(2, 1.0)
            .unwrap()
            .with_normalizations(vec![Normalization::unit(); 3])
            .is_err());
    }
}
