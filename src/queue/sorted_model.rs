//! Queue entries
//!
//! A `SortedModel` wraps a model with its compatibility degree and the list of
//! its nearest neighbours among the other queue members.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::traits::InternalModel;

/// Stable identifier of a model that entered a queue
///
/// Identifiers are never reused within a queue, even after eviction.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ModelId(pub usize);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model({})", self.0)
    }
}

/// One entry of a model's nearest-neighbour list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Identifier of the neighbouring model
    pub id: ModelId,
    /// Arena slot of the neighbouring model
    pub(crate) slot: usize,
    /// Similarity between the two models
    pub similarity: f64,
}

/// A queued model with its cached ranking data
#[derive(Clone, Debug)]
pub struct SortedModel<M: InternalModel> {
    pub(crate) id: ModelId,
    pub(crate) model: M,
    pub(crate) compatibility_degree: f64,
    /// Nearest first, at most `k` entries
    pub(crate) neighbors: Vec<Neighbor>,
}

impl<M: InternalModel> SortedModel<M> {
    pub(crate) fn new(id: ModelId, model: M, compatibility_degree: f64) -> Self {
        Self {
            id,
            model,
            compatibility_degree,
            neighbors: Vec::new(),
        }
    }

    /// Identifier of this entry
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The wrapped model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Unwrap the model
    pub fn into_model(self) -> M {
        self.model
    }

    /// Compatibility degree with the feedback the queue was last scored against
    pub fn compatibility_degree(&self) -> f64 {
        self.compatibility_degree
    }

    /// Whether the degree is positive
    pub fn is_compatible(&self) -> bool {
        self.compatibility_degree > 0.0
    }

    /// Nearest neighbours, nearest first
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// Number of filled neighbour slots
    pub fn no_stored_models(&self) -> usize {
        self.neighbors.len()
    }

    /// Similarity to the `i`-th nearest neighbour (0-based)
    pub fn neighbor_similarity(&self, i: usize) -> Option<f64> {
        self.neighbors.get(i).map(|n| n.similarity)
    }

    /// Whether `id` is one of the cached neighbours
    pub fn has_neighbor(&self, id: ModelId) -> bool {
        self.neighbors.iter().any(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lnorm::LNorm;

    #[test]
    fn test_compatibility_flag() {
        let model = LNorm::chebyshev(vec![0.5, 0.5]).unwrap();
        assert!(SortedModel::new(ModelId(0), model.clone(), 0.1).is_compatible());
        assert!(!SortedModel::new(ModelId(1), model.clone(), 0.0).is_compatible());
        assert!(!SortedModel::new(ModelId(2), model, -0.3).is_compatible());
    }

    #[test]
    fn test_neighbor_accessors() {
        let model = LNorm::chebyshev(vec![0.5, 0.5]).unwrap();
        let mut entry = SortedModel::new(ModelId(0), model, 1.0);
        entry.neighbors = vec![
            Neighbor {
                id: ModelId(4),
                slot: 1,
                similarity: 0.1,
            },
            Neighbor {
                id: ModelId(7),
                slot: 2,
                similarity: 0.3,
            },
        ];
        assert_eq!(entry.no_stored_models(), 2);
        assert_eq!(entry.neighbor_similarity(1), Some(0.3));
        assert_eq!(entry.neighbor_similarity(2), None);
        assert!(entry.has_neighbor(ModelId(7)));
        assert!(!entry.has_neighbor(ModelId(0)));
        assert_eq!(ModelId(4).to_string(), "Model(4)");
    }
}
