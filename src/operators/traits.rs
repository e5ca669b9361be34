//! Operator traits
//!
//! This module defines the operator traits used to breed new candidate models.
//! Operators act on raw weight vectors; the offspring constructor takes care of
//! turning the result back into a model. The random number generator is passed
//! as a trait object so operators can be boxed.

use rand::RngCore;

use crate::error::{OperatorResult, PrefResult};
use crate::model::traits::InternalModel;

/// Selection operator trait
///
/// Selects a member of a population ranked best first.
pub trait SelectionOperator: Send + Sync {
    /// Select a single position in `0..population_size` (0 = best)
    fn select(&self, population_size: usize, rng: &mut dyn RngCore) -> usize;
}

/// Crossover operator trait
///
/// Combines two parent weight vectors into two offspring vectors.
pub trait CrossoverOperator: Send + Sync {
    /// Apply crossover to two parents and produce two offspring
    fn crossover(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut dyn RngCore,
    ) -> OperatorResult<(Vec<f64>, Vec<f64>)>;
}

/// Mutation operator trait
///
/// Applies random changes to a weight vector.
pub trait MutationOperator: Send + Sync {
    /// Apply mutation in place
    fn mutate(&self, weights: &mut [f64], rng: &mut dyn RngCore);
}

/// Builds one offspring model from two parent models
pub trait OffspringConstructor<M: InternalModel>: Send + Sync {
    /// Breed a new model
    fn construct(&self, parent1: &M, parent2: &M, rng: &mut dyn RngCore) -> PrefResult<M>;
}
