//! Iteration budgets
//!
//! The budget is the only bound on the work of a construction call, so it is
//! honoured even when every candidate is rejected. A budget of 0 disables
//! sampling for the call.

use serde::{Deserialize, Serialize};

use crate::constructor::report::ConstructionStats;
use crate::preference::comparison::PreferenceInformationWrapper;
use crate::preference::context::DecisionContext;

/// Cap on the number of improvement attempts of one construction call
pub trait IterationsLimit: Send + Sync {
    /// Number of attempts allowed for a call requesting `samples` models
    fn iterations(
        &self,
        context: &DecisionContext,
        feedback: &[PreferenceInformationWrapper],
        stats: &ConstructionStats,
        samples: usize,
    ) -> usize;
}

/// Fixed budget
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantIterations(pub usize);

impl Default for ConstantIterations {
    fn default() -> Self {
        Self(1000)
    }
}

impl IterationsLimit for ConstantIterations {
    fn iterations(
        &self,
        _context: &DecisionContext,
        _feedback: &[PreferenceInformationWrapper],
        _stats: &ConstructionStats,
        _samples: usize,
    ) -> usize {
        self.0
    }
}

/// Budget growing with the amount of feedback
///
/// More comparisons shrink the compatible region, so more candidates are
/// needed to fill the population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackScaledIterations {
    /// Attempts allowed without feedback
    pub base: usize,
    /// Additional attempts per comparison
    pub per_preference: usize,
    /// Upper bound
    pub max: usize,
}

impl IterationsLimit for FeedbackScaledIterations {
    fn iterations(
        &self,
        _context: &DecisionContext,
        feedback: &[PreferenceInformationWrapper],
        _stats: &ConstructionStats,
        _samples: usize,
    ) -> usize {
        self.per_preference
            .saturating_mul(feedback.len())
            .saturating_add(self.base)
            .min(self.max)
    }
}
