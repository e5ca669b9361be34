//! Representative model selection
//!
//! Selectors reduce an accepted population to a single model. `None` is a
//! normal outcome which the constructor reports as an inconsistency.

use crate::compatibility::{CompatibilityAnalyzer, MostDiscriminating};
use crate::model::traits::InternalModel;
use crate::preference::comparison::PreferenceInformationWrapper;
use crate::similarity::{Euclidean, Similarity};

/// Picks one representative model out of a population
pub trait RepresentativeModelSelector<M: InternalModel>: Send + Sync {
    /// Select a model, or `None` when no model qualifies
    fn select_model(&self, models: &[M], feedback: &[PreferenceInformationWrapper]) -> Option<M>;
}

/// Most discriminating value function
///
/// Selects the compatible model reproducing the feedback with the largest
/// minimal margin. Fails if no model is compatible.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostDiscriminatingSelector;

impl<M: InternalModel> RepresentativeModelSelector<M> for MostDiscriminatingSelector {
    fn select_model(&self, models: &[M], feedback: &[PreferenceInformationWrapper]) -> Option<M> {
        models
            .iter()
            .map(|m| (m, MostDiscriminating.compatibility(m, feedback)))
            .filter(|(_, degree)| *degree > 0.0)
            .reduce(|best, next| if next.1 > best.1 { next } else { best })
            .map(|(m, _)| m.clone())
    }
}

/// Model whose weights lie closest to the mean weight vector
#[derive(Clone, Copy, Debug, Default)]
pub struct CentralModelSelector;

impl<M: InternalModel> RepresentativeModelSelector<M> for CentralModelSelector {
    fn select_model(&self, models: &[M], _feedback: &[PreferenceInformationWrapper]) -> Option<M> {
        let first = models.first()?;
        let mut centre = vec![0.0; first.dimensions()];
        for m in models {
            for (c, w) in centre.iter_mut().zip(m.weights()) {
                *c += w;
            }
        }
        centre.iter_mut().for_each(|c| *c /= models.len() as f64);

        models
            .iter()
            .map(|m| (m, Euclidean.similarity(m.weights(), &centre)))
            .reduce(|best, next| if next.1 < best.1 { next } else { best })
            .map(|(m, _)| m.clone())
    }
}
