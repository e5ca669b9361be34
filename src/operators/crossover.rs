//! Crossover operators
//!
//! Both operators act on weight vectors and keep every component inside
//! `[0, 1]`. The result is generally not on the simplex; the offspring
//! constructor projects it back.

use rand::{Rng, RngCore};

use crate::error::{OperatorError, OperatorResult};
use crate::operators::traits::CrossoverOperator;

const LOWER: f64 = 0.0;
const UPPER: f64 = 1.0;

fn check_dimensions(parent1: &[f64], parent2: &[f64]) -> Result<(), OperatorError> {
    if parent1.len() != parent2.len() {
        return Err(OperatorError::CrossoverFailed(
            "Parent dimensions do not match".to_string(),
        ));
    }
    Ok(())
}

/// Simulated Binary Crossover (SBX)
///
/// SBX generates offspring from parents using a spread factor that
/// simulates single-point crossover for binary strings.
///
/// Reference: Deb, K., & Agrawal, R. B. (1995). Simulated Binary Crossover
/// for Continuous Search Space.
#[derive(Clone, Debug)]
pub struct SbxCrossover {
    /// Distribution index (typically 2-20)
    /// Higher values = offspring closer to parents
    pub eta: f64,
    /// Per-component crossover probability
    pub crossover_probability: f64,
}

impl SbxCrossover {
    /// Create a new SBX crossover with the given distribution index
    pub fn new(eta: f64) -> Self {
        assert!(eta >= 0.0, "Distribution index must be non-negative");
        Self {
            eta,
            crossover_probability: 0.9,
        }
    }

    /// Set the per-component crossover probability
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.crossover_probability = probability;
        self
    }

    /// Compute the spread factor β from a uniform random value
    fn spread_factor(&self, u: f64) -> f64 {
        if u <= 0.5 {
            (2.0 * u).powf(1.0 / (self.eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (self.eta + 1.0))
        }
    }
}

impl Default for SbxCrossover {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl CrossoverOperator for SbxCrossover {
    fn crossover(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut dyn RngCore,
    ) -> OperatorResult<(Vec<f64>, Vec<f64>)> {
        if let Err(e) = check_dimensions(parent1, parent2) {
            return OperatorResult::Failed(e);
        }

        let mut child1 = parent1.to_vec();
        let mut child2 = parent2.to_vec();

        for i in 0..parent1.len() {
            if rng.gen::<f64>() < self.crossover_probability {
                let x1 = parent1[i];
                let x2 = parent2[i];

                // Only apply if parents differ sufficiently
                if (x1 - x2).abs() > 1e-14 {
                    let beta = self.spread_factor(rng.gen::<f64>());
                    child1[i] = (0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2)).clamp(LOWER, UPPER);
                    child2[i] = (0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2)).clamp(LOWER, UPPER);
                }
            }
        }

        OperatorResult::Success((child1, child2))
    }
}

/// Blend Crossover (BLX-α)
///
/// Creates offspring within an extended range defined by parents.
#[derive(Clone, Debug)]
pub struct BlxAlphaCrossover {
    /// Extension factor (typically 0.5)
    pub alpha: f64,
}

impl BlxAlphaCrossover {
    /// Create a new BLX-α crossover
    pub fn new(alpha: f64) -> Self {
        assert!(alpha >= 0.0, "Alpha must be non-negative");
        Self { alpha }
    }

    /// Create with default alpha = 0.5
    pub fn default_alpha() -> Self {
        Self::new(0.5)
    }
}

impl CrossoverOperator for BlxAlphaCrossover {
    fn crossover(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut dyn RngCore,
    ) -> OperatorResult<(Vec<f64>, Vec<f64>)> {
        if let Err(e) = check_dimensions(parent1, parent2) {
            return OperatorResult::Failed(e);
        }

        let mut child1 = Vec::with_capacity(parent1.len());
        let mut child2 = Vec::with_capacity(parent2.len());

        for (&x1, &x2) in parent1.iter().zip(parent2.iter()) {
            let min_val = x1.min(x2);
            let max_val = x1.max(x2);
            let range = max_val - min_val;

            let low = (min_val - self.alpha * range).max(LOWER);
            let high = (max_val + self.alpha * range).min(UPPER);
            if low > high {
                return OperatorResult::Failed(OperatorError::CrossoverFailed(format!(
                    "Parent components {} and {} are outside [0, 1]",
                    x1, x2
                )));
            }

            child1.push(rng.gen_range(low..=high));
            child2.push(rng.gen_range(low..=high));
        }

        OperatorResult::Success((child1, child2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sbx_creates_valid_offspring() {
        let mut rng = StdRng::seed_from_u64(42);
        let sbx = SbxCrossover::new(15.0).with_probability(1.0);
        let p1 = [0.1, 0.6, 0.3];
        let p2 = [0.7, 0.2, 0.1];
        for _ in 0..100 {
            let (c1, c2) = sbx.crossover(&p1, &p2, &mut rng).into_result().unwrap();
            assert_eq!(c1.len(), 3);
            assert!(c1.iter().chain(c2.iter()).all(|&x| (0.0..=1.0).contains(&x)));
        }
    }

    #[test]
    fn test_sbx_spread_factor() {
        let sbx = SbxCrossover::new(2.0);
        assert!((sbx.spread_factor(0.5) - 1.0).abs() < 1e-12);
        assert!(sbx.spread_factor(0.1) < 1.0);
        assert!(sbx.spread_factor(0.9) > 1.0);
    }

    #[test]
    fn test_sbx_identical_parents() {
        let mut rng = StdRng::seed_from_u64(42);
        let sbx = SbxCrossover::default().with_probability(1.0);
        let p = [0.25, 0.75];
        let (c1, c2) = sbx.crossover(&p, &p, &mut rng).into_result().unwrap();
        assert_eq!(c1, p.to_vec());
        assert_eq!(c2, p.to_vec());
    }

    #[test]
    fn test_sbx_dimension_mismatch() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = SbxCrossover::default().crossover(&[0.5, 0.5], &[1.0], &mut rng);
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_blx_alpha_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let blx = BlxAlphaCrossover::new(0.5);
        let p1 = [0.2, 0.8];
        let p2 = [0.4, 0.6];
        for _ in 0..100 {
            let (c1, c2) = blx.crossover(&p1, &p2, &mut rng).into_result().unwrap();
            for c in [&c1, &c2] {
                assert!((0.1..=0.5).contains(&c[0]));
                assert!((0.5..=0.9).contains(&c[1]));
            }
        }
    }

    #[test]
    fn test_blx_alpha_clamped_to_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let blx = BlxAlphaCrossover::new(2.0);
        for _ in 0..100 {
            let (c1, _) = blx.crossover(&[0.0, 1.0], &[0.1, 0.9], &mut rng).into_result().unwrap();
            assert!(c1.iter().all(|&x| (0.0..=1.0).contains(&x)));
        }
    }
}
