//! Mutation operators
//!
//! Both operators keep every weight component inside `[0, 1]`.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::operators::traits::MutationOperator;

/// Polynomial mutation (bounded)
///
/// Uses the polynomial probability distribution to perturb components.
///
/// Reference: Deb, K. (2001). Multi-Objective Optimization using Evolutionary Algorithms.
#[derive(Clone, Debug)]
pub struct PolynomialMutation {
    /// Distribution index (typically 20-100)
    /// Higher values = smaller mutations
    pub eta_m: f64,
    /// Per-component mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl PolynomialMutation {
    /// Create a new polynomial mutation with the given distribution index
    pub fn new(eta_m: f64) -> Self {
        assert!(eta_m >= 0.0, "Distribution index must be non-negative");
        Self {
            eta_m,
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per component
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }

    /// Perturb one component of `[0, 1]`
    fn mutate_component(&self, x: f64, rng: &mut dyn RngCore) -> f64 {
        let delta1 = x;
        let delta2 = 1.0 - x;

        let u = rng.gen::<f64>();
        let delta_q = if u <= 0.5 {
            let val = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta1).powf(self.eta_m + 1.0);
            val.powf(1.0 / (self.eta_m + 1.0)) - 1.0
        } else {
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * (1.0 - delta2).powf(self.eta_m + 1.0);
            1.0 - val.powf(1.0 / (self.eta_m + 1.0))
        };

        (x + delta_q).clamp(0.0, 1.0)
    }
}

impl Default for PolynomialMutation {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl MutationOperator for PolynomialMutation {
    fn mutate(&self, weights: &mut [f64], rng: &mut dyn RngCore) {
        let prob = self
            .mutation_probability
            .unwrap_or(1.0 / weights.len().max(1) as f64);

        for w in weights.iter_mut() {
            if rng.gen::<f64>() < prob {
                *w = self.mutate_component(w.clamp(0.0, 1.0), rng);
            }
        }
    }
}

/// Gaussian mutation
///
/// Adds Gaussian noise to each selected component, then clamps it to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct GaussianMutation {
    /// Standard deviation of the Gaussian noise
    pub sigma: f64,
    /// Per-component mutation probability
    pub mutation_probability: Option<f64>,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation with the given standard deviation
    pub fn new(sigma: f64) -> Self {
        assert!(
            sigma.is_finite() && sigma >= 0.0,
            "Sigma must be non-negative"
        );
        Self {
            sigma,
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per component
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }
}

impl MutationOperator for GaussianMutation {
    fn mutate(&self, weights: &mut [f64], rng: &mut dyn RngCore) {
        let prob = self
            .mutation_probability
            .unwrap_or(1.0 / weights.len().max(1) as f64);
        let normal = match Normal::new(0.0, self.sigma) {
            Ok(normal) => normal,
            Err(_) => return,
        };

        for w in weights.iter_mut() {
            if rng.gen::<f64>() < prob {
                *w = (*w + normal.sample(rng)).clamp(0.0, 1.0);
            }
        }
    }
}
