//! Objective-space normalizations
//!
//! Models evaluate alternatives after mapping every criterion onto `[0, 1]`
//! with the normalization bound to that criterion. When the objective space
//! changes between construction calls the normalizations are rebound and the
//! owner of any cached evaluation has to invalidate it.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Linear min-max normalization of a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Value mapped to 0
    pub min: f64,
    /// Value mapped to 1
    pub max: f64,
}

impl Normalization {
    /// Create a new normalization
    pub fn new(min: f64, max: f64) -> Result<Self, ModelError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ModelError::InvalidParameter(format!(
                "normalization bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if min > max {
            return Err(ModelError::InvalidParameter(format!(
                "normalization min ({}) must be <= max ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Identity normalization on `[0, 1]`
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Map a raw criterion value onto `[0, 1]`
    ///
    /// A degenerate range maps every value to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        let range = self.range();
        if range <= 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Build one normalization per criterion from observed points
    pub fn from_points(points: &[Vec<f64>]) -> Option<Vec<Self>> {
        let dimensions = points.first()?.len();
        let mut result = vec![
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            };
            dimensions
        ];
        for point in points {
            for (n, &value) in result.iter_mut().zip(point.iter()) {
                n.min = n.min.min(value);
                n.max = n.max.max(value);
            }
        }
        Some(result)
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self::unit()
    }
}
