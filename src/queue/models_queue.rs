//! Bounded, compatibility-ranked queue of models
//!
//! Entries live in an arena of slots with stable indices. Pairwise
//! similarities are cached in a slot-indexed matrix and every entry keeps the
//! slots of its `k` nearest neighbours, so a membership change only rebuilds
//! the neighbour lists that referenced the evicted entry and offers the new
//! entry to every other list. Neighbour lists are always consistent with the
//! current membership.

use std::cmp::Ordering;

use log::{debug, trace};

use crate::compatibility::CompatibilityAnalyzer;
use crate::error::{PrefResult, PreferenceError};
use crate::model::normalization::Normalization;
use crate::model::traits::InternalModel;
use crate::preference::comparison::PreferenceInformationWrapper;
use crate::queue::comparator::ModelComparator;
use crate::queue::sorted_model::{ModelId, Neighbor, SortedModel};
use crate::similarity::Similarity;

/// Result of offering a model to the queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The queue had room for the model
    Inserted(ModelId),
    /// The model took the place of the worst entry
    Replaced {
        /// Identifier given to the new entry
        inserted: ModelId,
        /// Identifier of the evicted entry
        evicted: ModelId,
    },
    /// The model ranked below every member and was dropped
    Discarded,
}

impl InsertOutcome {
    /// Whether the model entered the queue
    pub fn is_inserted(&self) -> bool {
        !matches!(self, Self::Discarded)
    }

    /// Identifier of the new entry, if it entered the queue
    pub fn inserted_id(&self) -> Option<ModelId> {
        match self {
            Self::Inserted(id) | Self::Replaced { inserted: id, .. } => Some(*id),
            Self::Discarded => None,
        }
    }
}

/// Bounded population of models sorted best first
pub struct ModelsQueue<M: InternalModel> {
    capacity: usize,
    k: usize,
    similarity: Box<dyn Similarity>,
    comparator: ModelComparator,
    slots: Vec<Option<SortedModel<M>>>,
    similarities: Vec<Vec<f64>>,
    /// Occupied slots, best first
    order: Vec<usize>,
    free: Vec<usize>,
    compatible: usize,
    next_id: usize,
}

impl<M: InternalModel> ModelsQueue<M> {
    /// Create an empty queue holding at most `capacity` models, each caching
    /// its `k` nearest neighbours
    pub fn new(
        capacity: usize,
        k: usize,
        similarity: Box<dyn Similarity>,
        comparator: ModelComparator,
    ) -> PrefResult<Self> {
        if capacity == 0 {
            return Err(PreferenceError::Configuration {
                field: "capacity",
                reason: "queue capacity must be positive".to_string(),
            });
        }
        if k == 0 {
            return Err(PreferenceError::Configuration {
                field: "k_most_similar_neighbours",
                reason: "at least one neighbour must be tracked".to_string(),
            });
        }
        if let ModelComparator::KNearest { k: 0 } = comparator {
            return Err(PreferenceError::Configuration {
                field: "comparator",
                reason: "neighbour rank must be at least 1".to_string(),
            });
        }
        Ok(Self {
            capacity,
            k,
            similarity,
            comparator,
            slots: Vec::with_capacity(capacity),
            similarities: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            free: Vec::new(),
            compatible: 0,
            next_id: 0,
        })
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tracked neighbours per entry
    pub fn k(&self) -> usize {
        self.k
    }

    /// Active comparator
    pub fn comparator(&self) -> ModelComparator {
        self.comparator
    }

    /// Whether the similarity measure treats smaller values as closer
    pub fn is_less_meaning_closer(&self) -> bool {
        self.similarity.is_less_meaning_closer()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the queue holds no entry
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the queue is at capacity
    pub fn is_full(&self) -> bool {
        self.order.len() >= self.capacity
    }

    /// Number of entries
    pub fn no_stored_models(&self) -> usize {
        self.len()
    }

    /// Number of entries with a positive compatibility degree
    pub fn no_compatible_models(&self) -> usize {
        self.compatible
    }

    /// Entries, best first
    pub fn queue(&self) -> impl Iterator<Item = &SortedModel<M>> + '_ {
        self.order.iter().filter_map(move |&s| self.slots[s].as_ref())
    }

    /// Entry at a queue position (0 = best)
    pub fn get(&self, position: usize) -> Option<&SortedModel<M>> {
        self.order
            .get(position)
            .and_then(|&s| self.slots[s].as_ref())
    }

    /// Best entry
    pub fn best(&self) -> Option<&SortedModel<M>> {
        self.get(0)
    }

    /// Worst entry
    pub fn worst(&self) -> Option<&SortedModel<M>> {
        self.order.last().and_then(|&s| self.slots[s].as_ref())
    }

    /// Entry with the given identifier
    pub fn find(&self, id: ModelId) -> Option<&SortedModel<M>> {
        self.queue().find(|e| e.id() == id)
    }

    /// All models, best first
    pub fn models(&self) -> Vec<M> {
        self.queue().map(|e| e.model().clone()).collect()
    }

    /// Compatible models, best first
    pub fn compatible_models(&self) -> Vec<M> {
        self.queue()
            .filter(|e| e.is_compatible())
            .map(|e| e.model().clone())
            .collect()
    }

    /// Remove every entry
    ///
    /// Identifiers keep increasing across clears.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.similarities.clear();
        self.order.clear();
        self.free.clear();
        self.compatible = 0;
    }

    /// Replace the content of the queue with a batch of models.
    ///
    /// The first `capacity` models are loaded at once: all pairwise
    /// similarities and neighbour lists are computed and the queue is sorted a
    /// single time. Any further models are offered one by one through
    /// [`insert`](Self::insert).
    pub fn initialize_with_batch<A>(
        &mut self,
        models: Vec<M>,
        feedback: &[PreferenceInformationWrapper],
        analyzer: &A,
    ) where
        A: CompatibilityAnalyzer<M> + ?Sized,
    {
        self.clear();
        let mut models = models.into_iter();

        for model in models.by_ref().take(self.capacity) {
            let degree = analyzer.compatibility(&model, feedback);
            let id = self.next_model_id();
            let slot = self.allocate_slot();
            if degree > 0.0 {
                self.compatible += 1;
            }
            self.slots[slot] = Some(SortedModel::new(id, model, degree));
            self.order.push(slot);
        }

        for i in 0..self.order.len() {
            for j in (i + 1)..self.order.len() {
                let (a, b) = (self.order[i], self.order[j]);
                let s = self.similarity.similarity(
                    self.slot_model(a).weights(),
                    self.slot_model(b).weights(),
                );
                self.similarities[a][b] = s;
                self.similarities[b][a] = s;
            }
        }
        for slot in self.order.clone() {
            self.rebuild_neighbors(slot);
        }
        self.sort_order();

        for model in models {
            let degree = analyzer.compatibility(&model, feedback);
            self.insert(model, degree);
        }
        debug!(
            "Queue initialized with {} models ({} compatible)",
            self.len(),
            self.compatible
        );
    }

    /// Offer a scored model to the queue.
    ///
    /// When the queue is full the model's neighbour profile is computed against
    /// the current members and compared with the worst entry; the model is
    /// discarded only if it ranks strictly below it, otherwise the worst entry
    /// is evicted to make room.
    pub fn insert(&mut self, model: M, compatibility_degree: f64) -> InsertOutcome {
        let similarities: Vec<(usize, f64)> = self
            .order
            .iter()
            .map(|&o| {
                let s = self
                    .similarity
                    .similarity(model.weights(), self.slot_model(o).weights());
                (o, s)
            })
            .collect();

        let id = self.next_model_id();
        let mut candidate = SortedModel::new(id, model, compatibility_degree);

        let worst = if self.is_full() {
            self.order.last().copied()
        } else {
            None
        };
        let Some(worst_slot) = worst else {
            self.place(candidate, &similarities);
            trace!("{} inserted with degree {}", id, compatibility_degree);
            return InsertOutcome::Inserted(id);
        };

        candidate.neighbors = self.nearest(similarities.iter().copied());
        let ranking = self.comparator.compare(
            &candidate,
            self.slot_entry(worst_slot),
            self.is_less_meaning_closer(),
        );
        if ranking == Ordering::Greater {
            trace!("{} discarded with degree {}", id, compatibility_degree);
            return InsertOutcome::Discarded;
        }

        let evicted = self.evict(worst_slot);
        let remaining: Vec<(usize, f64)> = similarities
            .into_iter()
            .filter(|&(o, _)| o != worst_slot)
            .collect();
        self.place(candidate, &remaining);
        debug!("{} replaced {}", id, evicted);
        InsertOutcome::Replaced {
            inserted: id,
            evicted,
        }
    }

    /// Recompute every compatibility degree against new feedback and resort
    pub fn rescore<A>(&mut self, feedback: &[PreferenceInformationWrapper], analyzer: &A)
    where
        A: CompatibilityAnalyzer<M> + ?Sized,
    {
        for &slot in &self.order {
            if let Some(entry) = self.slots[slot].as_mut() {
                let was_compatible = entry.is_compatible();
                entry.compatibility_degree = analyzer.compatibility(&entry.model, feedback);
                match (was_compatible, entry.is_compatible()) {
                    (true, false) => self.compatible -= 1,
                    (false, true) => self.compatible += 1,
                    _ => {}
                }
            }
        }
        self.sort_order();
    }

    /// Evict every incompatible entry, returning how many were removed
    pub fn retain_compatible(&mut self) -> usize {
        let incompatible: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&s| !self.slot_entry(s).is_compatible())
            .collect();
        for &slot in &incompatible {
            self.evict(slot);
        }
        self.sort_order();
        incompatible.len()
    }

    /// Rebind the normalizations of every queued model.
    ///
    /// Compatibility degrees become stale and should be refreshed with
    /// [`rescore`](Self::rescore).
    pub fn set_normalizations(&mut self, normalizations: Option<Vec<Normalization>>) {
        for slot in self.slots.iter_mut().flatten() {
            slot.model.set_normalizations(normalizations.clone());
        }
    }

    fn next_model_id(&mut self) -> ModelId {
        let id = ModelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn allocate_slot(&mut self) -> usize {
        if let Some(slot) = self.free.pop() {
            return slot;
        }
        self.slots.push(None);
        for row in &mut self.similarities {
            row.push(0.0);
        }
        self.similarities.push(vec![0.0; self.slots.len()]);
        self.slots.len() - 1
    }

    fn slot_entry(&self, slot: usize) -> &SortedModel<M> {
        match &self.slots[slot] {
            Some(entry) => entry,
            None => panic!("slot {} is not occupied", slot),
        }
    }

    fn slot_model(&self, slot: usize) -> &M {
        &self.slot_entry(slot).model
    }

    /// Nearest first; equally close neighbours by identifier
    fn closeness(&self, a: &Neighbor, b: &Neighbor) -> Ordering {
        let by_similarity = if self.is_less_meaning_closer() {
            a.similarity.total_cmp(&b.similarity)
        } else {
            b.similarity.total_cmp(&a.similarity)
        };
        by_similarity.then_with(|| a.id.cmp(&b.id))
    }

    fn nearest(&self, similarities: impl Iterator<Item = (usize, f64)>) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = similarities
            .map(|(slot, similarity)| Neighbor {
                id: self.slot_entry(slot).id,
                slot,
                similarity,
            })
            .collect();
        neighbors.sort_by(|a, b| self.closeness(a, b));
        neighbors.truncate(self.k);
        neighbors
    }

    fn rebuild_neighbors(&mut self, slot: usize) {
        let row = &self.similarities[slot];
        let neighbors = self.nearest(
            self.order
                .iter()
                .filter(|&&o| o != slot)
                .map(|&o| (o, row[o])),
        );
        if let Some(entry) = self.slots[slot].as_mut() {
            entry.neighbors = neighbors;
        }
    }

    fn offer_neighbor(&mut self, slot: usize, neighbor: Neighbor) {
        let k = self.k;
        let position = self.slot_entry(slot).neighbors.iter().position(|n| {
            self.closeness(&neighbor, n) == Ordering::Less
        });
        if let Some(entry) = self.slots[slot].as_mut() {
            let position = position.unwrap_or(entry.neighbors.len());
            if position < k {
                entry.neighbors.insert(position, neighbor);
                entry.neighbors.truncate(k);
            }
        }
    }

    fn place(&mut self, mut entry: SortedModel<M>, similarities: &[(usize, f64)]) -> ModelId {
        let slot = self.allocate_slot();
        for &(other, s) in similarities {
            self.similarities[slot][other] = s;
            self.similarities[other][slot] = s;
        }

        let id = entry.id;
        entry.neighbors.clear();
        if entry.is_compatible() {
            self.compatible += 1;
        }
        self.slots[slot] = Some(entry);

        for other in self.order.clone() {
            let similarity = self.similarities[slot][other];
            self.offer_neighbor(other, Neighbor { id, slot, similarity });
        }
        self.order.push(slot);
        self.rebuild_neighbors(slot);
        self.sort_order();
        id
    }

    /// Remove an entry and repair the neighbour lists that referenced it.
    ///
    /// The order is left unsorted.
    fn evict(&mut self, slot: usize) -> ModelId {
        let entry = match self.slots[slot].take() {
            Some(entry) => entry,
            None => panic!("slot {} is not occupied", slot),
        };
        self.order.retain(|&o| o != slot);
        self.free.push(slot);
        if entry.is_compatible() {
            self.compatible -= 1;
        }

        let affected: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&o| self.slot_entry(o).has_neighbor(entry.id))
            .collect();
        for o in affected {
            self.rebuild_neighbors(o);
        }
        entry.id
    }

    fn sort_order(&mut self) {
        let mut order = std::mem::take(&mut self.order);
        let less_is_closer = self.is_less_meaning_closer();
        order.sort_by(|&a, &b| {
            let (ea, eb) = (self.slot_entry(a), self.slot_entry(b));
            self.comparator
                .compare(ea, eb, less_is_closer)
                .then_with(|| ea.id.cmp(&eb.id))
        });
        self.order = order;
    }
}
