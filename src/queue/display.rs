//! Display-matrix export
//!
//! Visualization collaborators read the population as a plain numeric matrix:
//! one row per model holding its weights in criterion order followed by its
//! auxiliary scalar (the compensation level of an L-norm).

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::traits::InternalModel;
use crate::queue::models_queue::ModelsQueue;

/// Row-per-model numeric export of a population
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayMatrix {
    #[serde(with = "display_rows")]
    rows: Vec<Vec<f64>>,
}

impl DisplayMatrix {
    /// Export every queue entry, best first
    pub fn from_queue<M: InternalModel>(queue: &ModelsQueue<M>) -> Self {
        Self::from_rows(queue.queue().map(|e| e.model()))
    }

    /// Export a list of models in the given order
    pub fn from_models<M: InternalModel>(models: &[M]) -> Self {
        Self::from_rows(models.iter())
    }

    fn from_rows<'a, M: InternalModel>(models: impl Iterator<Item = &'a M>) -> Self {
        let rows = models
            .map(|m| {
                let mut row = Vec::with_capacity(m.dimensions() + 1);
                row.extend_from_slice(m.weights());
                row.push(m.auxiliary());
                row
            })
            .collect();
        Self { rows }
    }

    /// Raw rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of exported models
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no model was exported
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Weights and auxiliary scalar of the model in `row`
    pub fn parameters(&self, row: usize) -> Option<(&[f64], f64)> {
        let values = self.rows.get(row)?;
        let (auxiliary, weights) = values.split_last()?;
        Some((weights, *auxiliary))
    }

    /// Rebuild the model in `row` from a template of the same family
    ///
    /// Weights and auxiliary parameter come from the row; only the
    /// normalizations are taken from the template.
    pub fn model_at<M: InternalModel>(&self, row: usize, template: &M) -> Result<M, ModelError> {
        let (weights, auxiliary) = self.parameters(row).ok_or_else(|| {
            ModelError::InvalidParameter(format!("display matrix has no row {}", row))
        })?;
        template.with_parameters(weights.to_vec(), auxiliary)
    }
}

/// JSON has no infinity, so an infinite auxiliary cell is stored as `null`.
mod display_rows {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(rows: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<Vec<Option<f64>>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| if v.is_infinite() { None } else { Some(v) })
                    .collect()
            })
            .collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<f64>>, D::Error> {
        let encoded = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|row| {
                let last = row.len().saturating_sub(1);
                row.into_iter()
                    .enumerate()
                    .map(|(i, v)| match v {
                        Some(v) => Ok(v),
                        None if i == last => Ok(f64::INFINITY),
                        None => Err(D::Error::custom("only the auxiliary cell may be null")),
                    })
                    .collect()
            })
            .collect()
    }
}
