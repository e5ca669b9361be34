//! Evolutionary model constructor
//!
//! Breeds candidate models from the current queue: two parents are picked by
//! independent tournaments over queue positions, then handed to an offspring
//! constructor.

use rand::RngCore;

use crate::error::{PrefResult, PreferenceError};
use crate::model::traits::InternalModel;
use crate::operators::offspring::StandardOffspring;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::{OffspringConstructor, SelectionOperator};
use crate::queue::models_queue::ModelsQueue;
use crate::queue::sorted_model::SortedModel;

/// Tournament-based reproduction over a models queue
pub struct EvolutionaryModelConstructor<M: InternalModel> {
    selection: TournamentSelection,
    offspring: Box<dyn OffspringConstructor<M>>,
}

impl<M: InternalModel> EvolutionaryModelConstructor<M> {
    /// Create a constructor with the given tournament size and offspring
    /// operator
    pub fn new<O>(tournament_size: usize, offspring: O) -> PrefResult<Self>
    where
        O: OffspringConstructor<M> + 'static,
    {
        if tournament_size == 0 {
            return Err(PreferenceError::Configuration {
                field: "tournament_size",
                reason: "tournament size must be at least 1".to_string(),
            });
        }
        Ok(Self {
            selection: TournamentSelection::new(tournament_size),
            offspring: Box::new(offspring),
        })
    }

    /// Binary tournaments with SBX crossover and polynomial mutation
    pub fn standard() -> Self {
        Self {
            selection: TournamentSelection::binary(),
            offspring: Box::new(StandardOffspring::default()),
        }
    }

    /// Tournament size
    pub fn tournament_size(&self) -> usize {
        self.selection.tournament_size
    }

    /// Pick one parent by tournament over queue positions
    pub fn select_parent<'a>(
        &self,
        queue: &'a ModelsQueue<M>,
        rng: &mut dyn RngCore,
    ) -> PrefResult<&'a SortedModel<M>> {
        if queue.is_empty() {
            return Err(PreferenceError::EmptyQueue);
        }
        let position = self.selection.select(queue.len(), rng);
        queue.get(position).ok_or(PreferenceError::EmptyQueue)
    }

    /// Breed one new candidate model from the queue
    pub fn get_model(&self, queue: &ModelsQueue<M>, rng: &mut dyn RngCore) -> PrefResult<M> {
        let parent1 = self.select_parent(queue, rng)?;
        let parent2 = self.select_parent(queue, rng)?;
        self.offspring
            .construct(parent1.model(), parent2.model(), rng)
    }
}
