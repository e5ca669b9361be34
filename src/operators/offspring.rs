//! Offspring construction
//!
//! Turns two parent models into one child model of the same family.

use rand::{Rng, RngCore};

use crate::error::PrefResult;
use crate::model::traits::{project_onto_simplex, InternalModel};
use crate::operators::crossover::SbxCrossover;
use crate::operators::mutation::PolynomialMutation;
use crate::operators::traits::{CrossoverOperator, MutationOperator, OffspringConstructor};

/// Crossover and mutation on weight vectors followed by a projection back
/// onto the simplex.
///
/// The child takes its auxiliary parameter and normalizations from the first
/// parent.
#[derive(Clone, Debug)]
pub struct SimplexOffspring<C, Mu> {
    crossover: C,
    mutation: Mu,
}

impl<C, Mu> SimplexOffspring<C, Mu>
where
    C: CrossoverOperator,
    Mu: MutationOperator,
{
    /// Create a new offspring constructor
    pub fn new(crossover: C, mutation: Mu) -> Self {
        Self {
            crossover,
            mutation,
        }
    }

    /// Crossover operator
    pub fn crossover(&self) -> &C {
        &self.crossover
    }

    /// Mutation operator
    pub fn mutation(&self) -> &Mu {
        &self.mutation
    }
}

/// SBX crossover with polynomial mutation
pub type StandardOffspring = SimplexOffspring<SbxCrossover, PolynomialMutation>;

impl Default for StandardOffspring {
    fn default() -> Self {
        Self::new(SbxCrossover::default(), PolynomialMutation::default())
    }
}

impl<M, C, Mu> OffspringConstructor<M> for SimplexOffspring<C, Mu>
where
    M: InternalModel,
    C: CrossoverOperator,
    Mu: MutationOperator,
{
    fn construct(&self, parent1: &M, parent2: &M, rng: &mut dyn RngCore) -> PrefResult<M> {
        let (child1, child2) = self
            .crossover
            .crossover(parent1.weights(), parent2.weights(), rng)
            .into_result()?;

        let mut weights = if rng.gen_bool(0.5) { child1 } else { child2 };
        self.mutation.mutate(&mut weights, rng);
        project_onto_simplex(&mut weights);

        Ok(parent1.with_weights(weights)?)
    }
}
