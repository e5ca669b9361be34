//! Preference history
//!
//! The history owns every accepted piece of feedback. Construction calls only
//! borrow a slice of it for their duration.

use serde::{Deserialize, Serialize};

use crate::error::{PrefResult, PreferenceError};
use crate::preference::comparison::{PairwiseComparison, PreferenceInformationWrapper};

/// Append-only log of decision-maker feedback
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceHistory {
    entries: Vec<PreferenceInformationWrapper>,
    next_id: usize,
}

impl PreferenceHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a comparison made during `iteration`, returning its id
    pub fn add(&mut self, preference: PairwiseComparison, iteration: usize) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.entries
            .push(PreferenceInformationWrapper::new(id, iteration, preference));
        id
    }

    /// All accepted feedback, oldest first
    pub fn entries(&self) -> &[PreferenceInformationWrapper] {
        &self.entries
    }

    /// Feedback accepted during or after `iteration`
    pub fn since(&self, iteration: usize) -> impl Iterator<Item = &PreferenceInformationWrapper> {
        self.entries.iter().filter(move |e| e.iteration >= iteration)
    }

    /// Most recent decision-making iteration with feedback
    pub fn last_iteration(&self) -> Option<usize> {
        self.entries.iter().map(|e| e.iteration).max()
    }

    /// Number of accepted items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no feedback has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the history to JSON
    pub fn to_json(&self) -> PrefResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PreferenceError::Serialization(format!("Failed to serialize history: {}", e))
        })
    }

    /// Deserialize a history from JSON
    pub fn from_json(json: &str) -> PrefResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            PreferenceError::Serialization(format!("Failed to deserialize history: {}", e))
        })
    }
}
