//! Decision-making context
//!
//! The external decision-support orchestrator hands a context to every
//! construction call. The random number generator is not part of it; it is
//! passed explicitly so that determinism only depends on the seed.

use serde::{Deserialize, Serialize};

use crate::model::normalization::Normalization;

/// State of the surrounding decision-making process
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Current decision-making iteration
    pub iteration: usize,
    /// Current generation of the driving EMO algorithm
    pub generation: usize,
    /// Normalizations of the current objective space
    pub normalizations: Option<Vec<Normalization>>,
    /// Set when the objective space changed since the previous call
    pub normalizations_updated: bool,
}

impl DecisionContext {
    /// Create a context for the given iteration
    pub fn new(iteration: usize) -> Self {
        Self {
            iteration,
            ..Self::default()
        }
    }

    /// Set the generation of the driving algorithm
    pub fn with_generation(mut self, generation: usize) -> Self {
        self.generation = generation;
        self
    }

    /// Supply new normalizations and mark them as updated
    pub fn with_normalizations(mut self, normalizations: Vec<Normalization>) -> Self {
        self.normalizations = Some(normalizations);
        self.normalizations_updated = true;
        self
    }
}
