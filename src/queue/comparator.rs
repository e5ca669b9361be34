//! Queue comparators
//!
//! Comparators define the total order of a models queue. `Ordering::Less`
//! means the first entry ranks before (is preferred to) the second one, so a
//! queue sorted ascending holds its best entry first.
//!
//! Both comparators rank compatible entries before incompatible ones and order
//! two entries by raw compatibility degree (higher first) whenever either of
//! them is incompatible. Among compatible entries, models lying far from their
//! neighbours rank first, which drives the population towards diversity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::traits::InternalModel;
use crate::queue::sorted_model::SortedModel;

/// Total order over queue entries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelComparator {
    /// Compare similarities to the `k`-th nearest neighbour.
    ///
    /// When an entry stores fewer than `k` neighbours its last stored one is
    /// used instead. The truncation is applied to each entry independently, so
    /// two entries of different neighbour counts may be compared at different
    /// depths.
    KNearest {
        /// Neighbour rank (1-based)
        k: usize,
    },

    /// Walk both neighbour lists from the nearest one outwards and decide at
    /// the first position where the similarities differ.
    ///
    /// Entries whose lists agree up to the shorter length are tied.
    MostSimilarWithTieResolving,
}

impl ModelComparator {
    /// Create a k-nearest comparator
    pub fn k_nearest(k: usize) -> Self {
        assert!(k >= 1, "Neighbour rank must be at least 1");
        Self::KNearest { k }
    }

    /// Compare two entries.
    ///
    /// `less_is_closer` is the convention of the similarity measure that
    /// produced the neighbour lists.
    pub fn compare<M: InternalModel>(
        &self,
        a: &SortedModel<M>,
        b: &SortedModel<M>,
        less_is_closer: bool,
    ) -> Ordering {
        if !a.is_compatible() || !b.is_compatible() {
            return by_degree(a, b);
        }

        match self {
            Self::KNearest { k } => match (kth_similarity(a, *k), kth_similarity(b, *k)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(sa), Some(sb)) => orient(sa.total_cmp(&sb), less_is_closer),
            },
            Self::MostSimilarWithTieResolving => a
                .neighbors()
                .iter()
                .zip(b.neighbors().iter())
                .map(|(na, nb)| orient(na.similarity.total_cmp(&nb.similarity), less_is_closer))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl Default for ModelComparator {
    fn default() -> Self {
        Self::KNearest { k: 3 }
    }
}

/// Higher degree first
fn by_degree<M: InternalModel>(a: &SortedModel<M>, b: &SortedModel<M>) -> Ordering {
    b.compatibility_degree().total_cmp(&a.compatibility_degree())
}

/// Similarity to the neighbour at index `min(k, stored) - 1`
fn kth_similarity<M: InternalModel>(entry: &SortedModel<M>, k: usize) -> Option<f64> {
    let stored = entry.no_stored_models();
    if stored == 0 {
        return None;
    }
    entry.neighbor_similarity(k.clamp(1, stored) - 1)
}

/// Lower similarity ranks first; distances rank the other way round.
fn orient(ordering: Ordering, less_is_closer: bool) -> Ordering {
    if less_is_closer {
        ordering.reverse()
    } else {
        ordering
    }
}
