//! Construction reports
//!
//! A report is produced by every construction call and is never modified
//! after it has been returned.

use serde::{Deserialize, Serialize};

use crate::error::{PrefResult, PreferenceError};

/// Counters of one construction call
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionStats {
    /// Carried-over models still compatible with the current feedback
    pub models_preserved: usize,
    /// Carried-over models discarded as incompatible
    pub models_discarded: usize,
    /// Candidates that entered the queue as compatible models
    pub models_accepted: usize,
    /// Candidates that were incompatible or lost against the worst entry
    pub models_rejected: usize,
    /// Improvement-loop iterations executed
    pub executed_iterations: usize,
    /// Whether the models were rebound to new normalizations
    pub normalizations_updated: bool,
    /// Compatible models held by the queue at the end of the call
    pub compatible_in_queue: usize,
    /// Wall-clock duration of the call in milliseconds
    pub elapsed_ms: u64,
}

impl ConstructionStats {
    /// Fraction of generated candidates that were accepted
    ///
    /// Returns 0 when no candidate was generated.
    pub fn success_rate(&self) -> f64 {
        let total = self.models_accepted + self.models_rejected;
        if total == 0 {
            return 0.0;
        }
        self.models_accepted as f64 / total as f64
    }
}

/// Result of a construction call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report<M> {
    /// Compatible models, best ranked first
    pub models: Vec<M>,
    /// Representative model, if a selector is configured and succeeded
    pub representative_model: Option<M>,
    /// Set when fewer compatible models than requested were found or the
    /// representative model could not be selected
    pub inconsistent: bool,
    /// Counters
    pub stats: ConstructionStats,
}

impl<M> Report<M> {
    /// Number of returned models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model was returned
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<M: Serialize> Report<M> {
    /// Serialize the report to JSON
    pub fn to_json(&self) -> PrefResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PreferenceError::Serialization(format!("Failed to serialize report: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lnorm::LNorm;
    use approx::assert_relative_eq;

    #[test]
    fn test_success_rate() {
        let mut stats = ConstructionStats::default();
        assert_eq!(stats.success_rate(), 0.0);
        stats.models_accepted = 3;
        stats.models_rejected = 9;
        assert_relative_eq!(stats.success_rate(), 0.25);
    }

    #[test]
    fn test_report_json() {
        let report = Report {
            models: vec![LNorm::chebyshev(vec![0.5, 0.5]).unwrap()],
            representative_model: None,
            inconsistent: true,
            stats: ConstructionStats {
                executed_iterations: 12,
                ..Default::default()
            },
        };
        let json = report.to_json().unwrap();
        let back: Report<LNorm> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert!(back.inconsistent);
        assert_eq!(back.stats, report.stats);
    }
}
