//! Evolutionary Rejection Sampling
//!
//! `Ers` keeps a bounded population of preference models compatible with the
//! decision maker's feedback. Each construction call re-validates the models
//! carried over from the previous call, seeds the population with the
//! configured initial models, then samples new candidates (randomly while the
//! queue has room, by tournament reproduction once it is full) until
//! `feasible_samples_to_generate` compatible models are held or the iteration
//! budget is spent.
//!
//! # Example
//!
//! ```rust,ignore
//! use ers_evo::prelude::*;
//!
//! let mut ers = ErsBuilder::<LNorm>::new()
//!     .feasible_samples_to_generate(50)
//!     .generator(LNormGenerator::chebyshev(2)?)
//!     .compatibility_analyzer(MostDiscriminating)
//!     .evolutionary_constructor(EvolutionaryModelConstructor::standard())
//!     .build()?;
//!
//! let mut rng = rand::thread_rng();
//! let report = ers.construct_models(&DecisionContext::new(0), history.entries(), &mut rng)?;
//! if report.inconsistent {
//!     println!("only {} compatible models", report.models.len());
//! }
//! ```

use std::time::Instant;

use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::compatibility::CompatibilityAnalyzer;
use crate::constructor::evolutionary::EvolutionaryModelConstructor;
use crate::constructor::iterations::{ConstantIterations, IterationsLimit};
use crate::constructor::report::{ConstructionStats, Report};
use crate::constructor::representative::RepresentativeModelSelector;
use crate::error::{ModelError, PrefResult, PreferenceError};
use crate::model::generator::ModelGenerator;
use crate::model::traits::InternalModel;
use crate::preference::comparison::PreferenceInformationWrapper;
use crate::preference::context::DecisionContext;
use crate::queue::comparator::ModelComparator;
use crate::queue::models_queue::ModelsQueue;
use crate::similarity::{Euclidean, Similarity};

/// Configuration for ERS
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErsConfig {
    /// Number of compatible models to construct (queue capacity)
    pub feasible_samples_to_generate: usize,
    /// Number of nearest neighbours cached per model
    pub k_most_similar_neighbours: usize,
    /// Re-validate and keep the models of the previous call
    pub validate_already_existing_samples_first: bool,
    /// Queue ordering
    pub comparator: ModelComparator,
    /// Budget used when no iterations limit is supplied
    pub default_iterations: usize,
}

impl Default for ErsConfig {
    fn default() -> Self {
        Self {
            feasible_samples_to_generate: 50,
            k_most_similar_neighbours: 3,
            validate_already_existing_samples_first: true,
            comparator: ModelComparator::KNearest { k: 3 },
            default_iterations: 1000,
        }
    }
}

/// Evolutionary Rejection Sampling constructor
pub struct Ers<M: InternalModel> {
    config: ErsConfig,
    generator: Box<dyn ModelGenerator<M>>,
    analyzer: Box<dyn CompatibilityAnalyzer<M>>,
    evolutionary: Option<EvolutionaryModelConstructor<M>>,
    iterations_limit: Box<dyn IterationsLimit>,
    selector: Option<Box<dyn RepresentativeModelSelector<M>>>,
    initial_models: Vec<M>,
    queue: ModelsQueue<M>,
}

impl<M: InternalModel> Ers<M> {
    /// Get the configuration
    pub fn config(&self) -> &ErsConfig {
        &self.config
    }

    /// Population carried between calls
    pub fn queue(&self) -> &ModelsQueue<M> {
        &self.queue
    }

    /// Models used to seed the population
    pub fn initial_models(&self) -> &[M] {
        &self.initial_models
    }

    /// Drop the carried population
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    /// Construct a population of models compatible with `feedback`.
    ///
    /// Fails only when the feedback or the context's normalizations do not
    /// match the dimensionality of the generated models; an incomplete
    /// population is reported through [`Report::inconsistent`].
    pub fn construct_models<R: Rng>(
        &mut self,
        context: &DecisionContext,
        feedback: &[PreferenceInformationWrapper],
        rng: &mut R,
    ) -> PrefResult<Report<M>> {
        let start = Instant::now();
        self.check_inputs(context, feedback)?;

        let samples = self.config.feasible_samples_to_generate;
        let mut stats = ConstructionStats::default();

        if context.normalizations_updated {
            self.rebind_normalizations(context);
            stats.normalizations_updated = true;
        }

        if self.config.validate_already_existing_samples_first {
            let carried = self.queue.len();
            self.queue.rescore(feedback, self.analyzer.as_ref());
            stats.models_discarded = self.queue.retain_compatible();
            stats.models_preserved = carried - stats.models_discarded;
            debug!(
                "Re-validation kept {} of {} models",
                stats.models_preserved, carried
            );
        } else {
            self.queue.clear();
        }

        self.seed_initial_models(feedback);

        let budget = self
            .iterations_limit
            .iterations(context, feedback, &stats, samples);
        while self.queue.no_compatible_models() < samples && stats.executed_iterations < budget {
            let candidate = match &self.evolutionary {
                Some(evolutionary) if self.queue.is_full() => {
                    evolutionary.get_model(&self.queue, rng)?
                }
                _ => self.generator.generate_model(rng),
            };
            stats.executed_iterations += 1;

            let degree = self.analyzer.compatibility(&candidate, feedback);
            let outcome = self.queue.insert(candidate, degree);
            if outcome.is_inserted() && self.analyzer.is_compatible(degree) {
                stats.models_accepted += 1;
            } else {
                stats.models_rejected += 1;
            }
        }

        stats.compatible_in_queue = self.queue.no_compatible_models();
        let models = self.queue.compatible_models();
        let mut inconsistent = stats.compatible_in_queue < samples;
        if inconsistent {
            warn!(
                "Iteration {}: only {} of {} compatible models after {} attempts",
                context.iteration, stats.compatible_in_queue, samples, stats.executed_iterations
            );
        }

        let representative_model = match &self.selector {
            Some(selector) => {
                let selected = selector.select_model(&models, feedback);
                if selected.is_none() {
                    warn!("Representative model could not be selected");
                    inconsistent = true;
                }
                selected
            }
            None => None,
        };

        stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Iteration {}: {} compatible models, {} accepted, {} rejected, {} iterations",
            context.iteration,
            stats.compatible_in_queue,
            stats.models_accepted,
            stats.models_rejected,
            stats.executed_iterations
        );

        Ok(Report {
            models,
            representative_model,
            inconsistent,
            stats,
        })
    }

    fn check_inputs(
        &self,
        context: &DecisionContext,
        feedback: &[PreferenceInformationWrapper],
    ) -> PrefResult<()> {
        let dimensions = self.generator.dimensions();
        if let Some(item) = feedback.iter().find(|f| !f.has_dimensions(dimensions)) {
            let actual = if item.preference.preferred.dimensions() != dimensions {
                item.preference.preferred.dimensions()
            } else {
                item.preference.not_preferred.dimensions()
            };
            return Err(PreferenceError::DimensionMismatch {
                id: item.id,
                expected: dimensions,
                actual,
            });
        }
        if context.normalizations_updated {
            if let Some(normalizations) = &context.normalizations {
                if normalizations.len() != dimensions {
                    return Err(ModelError::DimensionMismatch {
                        expected: dimensions,
                        actual: normalizations.len(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    fn rebind_normalizations(&mut self, context: &DecisionContext) {
        let normalizations = context.normalizations.clone();
        self.generator.set_normalizations(normalizations.clone());
        self.queue.set_normalizations(normalizations.clone());
        for model in &mut self.initial_models {
            model.set_normalizations(normalizations.clone());
        }
        info!(
            "Iteration {}: models rebound to new normalizations",
            context.iteration
        );
    }

    /// Insert the compatible initial models that are not queued yet
    fn seed_initial_models(&mut self, feedback: &[PreferenceInformationWrapper]) {
        let samples = self.config.feasible_samples_to_generate;
        for model in &self.initial_models {
            if self.queue.no_compatible_models() >= samples {
                break;
            }
            if self
                .queue
                .queue()
                .any(|e| e.model().weights() == model.weights())
            {
                continue;
            }
            let degree = self.analyzer.compatibility(model, feedback);
            if self.analyzer.is_compatible(degree) {
                self.queue.insert(model.clone(), degree);
            }
        }
    }
}

/// Builder for [`Ers`]
pub struct ErsBuilder<M: InternalModel> {
    config: ErsConfig,
    generator: Option<Box<dyn ModelGenerator<M>>>,
    analyzer: Option<Box<dyn CompatibilityAnalyzer<M>>>,
    similarity: Option<Box<dyn Similarity>>,
    evolutionary: Option<EvolutionaryModelConstructor<M>>,
    iterations_limit: Option<Box<dyn IterationsLimit>>,
    selector: Option<Box<dyn RepresentativeModelSelector<M>>>,
    initial_models: Vec<M>,
}

impl<M: InternalModel> ErsBuilder<M> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ErsConfig::default(),
            generator: None,
            analyzer: None,
            similarity: None,
            evolutionary: None,
            iterations_limit: None,
            selector: None,
            initial_models: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ErsConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of compatible models to construct
    pub fn feasible_samples_to_generate(mut self, samples: usize) -> Self {
        self.config.feasible_samples_to_generate = samples;
        self
    }

    /// Set the number of cached nearest neighbours
    pub fn k_most_similar_neighbours(mut self, k: usize) -> Self {
        self.config.k_most_similar_neighbours = k;
        self
    }

    /// Keep re-validated models between calls
    pub fn validate_already_existing_samples_first(mut self, validate: bool) -> Self {
        self.config.validate_already_existing_samples_first = validate;
        self
    }

    /// Set the queue comparator
    pub fn comparator(mut self, comparator: ModelComparator) -> Self {
        self.config.comparator = comparator;
        self
    }

    /// Set the budget used without an explicit iterations limit
    pub fn default_iterations(mut self, iterations: usize) -> Self {
        self.config.default_iterations = iterations;
        self
    }

    /// Set the random model generator
    pub fn generator<G>(mut self, generator: G) -> Self
    where
        G: ModelGenerator<M> + 'static,
    {
        self.generator = Some(Box::new(generator));
        self
    }

    /// Set the compatibility analyzer
    pub fn compatibility_analyzer<A>(mut self, analyzer: A) -> Self
    where
        A: CompatibilityAnalyzer<M> + 'static,
    {
        self.analyzer = Some(Box::new(analyzer));
        self
    }

    /// Set the similarity measure (Euclidean by default)
    pub fn similarity<S>(mut self, similarity: S) -> Self
    where
        S: Similarity + 'static,
    {
        self.similarity = Some(Box::new(similarity));
        self
    }

    /// Breed candidates from the queue once it is full
    pub fn evolutionary_constructor(mut self, constructor: EvolutionaryModelConstructor<M>) -> Self {
        self.evolutionary = Some(constructor);
        self
    }

    /// Set the iterations limit policy
    pub fn iterations_limit<L>(mut self, limit: L) -> Self
    where
        L: IterationsLimit + 'static,
    {
        self.iterations_limit = Some(Box::new(limit));
        self
    }

    /// Set the representative model selector
    pub fn representative_selector<S>(mut self, selector: S) -> Self
    where
        S: RepresentativeModelSelector<M> + 'static,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Models used to seed the population
    pub fn initial_models(mut self, models: Vec<M>) -> Self {
        self.initial_models = models;
        self
    }

    /// Build the constructor
    pub fn build(self) -> PrefResult<Ers<M>> {
        let generator = self
            .generator
            .ok_or(PreferenceError::MissingComponent("model generator"))?;
        let analyzer = self
            .analyzer
            .ok_or(PreferenceError::MissingComponent("compatibility analyzer"))?;

        if self.config.feasible_samples_to_generate == 0 {
            return Err(PreferenceError::Configuration {
                field: "feasible_samples_to_generate",
                reason: "at least one model must be requested".to_string(),
            });
        }
        let dimensions = generator.dimensions();
        if let Some(model) = self
            .initial_models
            .iter()
            .find(|m| m.dimensions() != dimensions)
        {
            return Err(PreferenceError::Configuration {
                field: "initial_models",
                reason: format!(
                    "initial model has {} criteria, generator has {}",
                    model.dimensions(),
                    dimensions
                ),
            });
        }

        let queue = ModelsQueue::new(
            self.config.feasible_samples_to_generate,
            self.config.k_most_similar_neighbours,
            self.similarity.unwrap_or_else(|| Box::new(Euclidean)),
            self.config.comparator,
        )?;
        let iterations_limit = self
            .iterations_limit
            .unwrap_or_else(|| Box::new(ConstantIterations(self.config.default_iterations)));

        Ok(Ers {
            config: self.config,
            generator,
            analyzer,
            evolutionary: self.evolutionary,
            iterations_limit,
            selector: self.selector,
            initial_models: self.initial_models,
            queue,
        })
    }
}

impl<M: InternalModel> Default for ErsBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::MostDiscriminating;
    use crate::constructor::representative::MostDiscriminatingSelector;
    use crate::model::generator::LNormGenerator;
    use crate::model::lnorm::LNorm;
    use crate::model::normalization::Normalization;
    use crate::preference::comparison::{Alternative, PairwiseComparison};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn feedback() -> Vec<PreferenceInformationWrapper> {
        let pairs = [
            ([0.4, 0.4], [0.2, 0.7]),
            ([0.45, 0.35], [0.8, 0.1]),
            ([0.35, 0.45], [0.1, 0.8]),
        ];
        pairs
            .iter()
            .enumerate()
            .map(|(i, (a, b))| {
                PreferenceInformationWrapper::new(
                    i,
                    0,
                    PairwiseComparison::new(
                        Alternative::new("a", a.to_vec()),
                        Alternative::new("b", b.to_vec()),
                    ),
                )
            })
            .collect()
    }

    fn builder(samples: usize) -> ErsBuilder<LNorm> {
        ErsBuilder::new()
            .feasible_samples_to_generate(samples)
            .generator(LNormGenerator::chebyshev(2).unwrap())
            .compatibility_analyzer(MostDiscriminating)
    }

    #[test]
    fn test_builder_requires_components() {
        let missing_generator = ErsBuilder::<LNorm>::new()
            .compatibility_analyzer(MostDiscriminating)
            .build();
        assert!(matches!(
            missing_generator,
            Err(PreferenceError::MissingComponent("model generator"))
        ));

        let missing_analyzer = ErsBuilder::<LNorm>::new()
            .generator(LNormGenerator::chebyshev(2).unwrap())
            .build();
        assert!(matches!(
            missing_analyzer,
            Err(PreferenceError::MissingComponent("compatibility analyzer"))
        ));
    }

    #[test]
    fn test_builder_validates_configuration() {
        assert!(matches!(
            builder(0).build(),
            Err(PreferenceError::Configuration {
                field: "feasible_samples_to_generate",
                ..
            })
        ));
        assert!(builder(5).k_most_similar_neighbours(0).build().is_err());
        assert!(builder(5)
            .comparator(ModelComparator::KNearest { k: 0 })
            .build()
            .is_err());
        assert!(matches!(
            builder(5)
                .initial_models(vec![LNorm::chebyshev(vec![0.2, 0.3, 0.5]).unwrap()])
                .build(),
            Err(PreferenceError::Configuration {
                field: "initial_models",
                ..
            })
        ));
    }

    #[test]
    fn test_config_serde() {
        let config = ErsConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ErsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
        assert_eq!(back.feasible_samples_to_generate, 50);
    }

    #[test]
    fn test_construct_compatible_models() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ers = builder(10)
            .default_iterations(5_000)
            .evolutionary_constructor(EvolutionaryModelConstructor::standard())
            .representative_selector(MostDiscriminatingSelector)
            .build()
            .unwrap();
        let feedback = feedback();
        let report = ers
            .construct_models(&DecisionContext::new(0), &feedback, &mut rng)
            .unwrap();

        assert!(!report.inconsistent);
        assert_eq!(report.models.len(), 10);
        for model in &report.models {
            for item in &feedback {
                assert!(item.preference.is_satisfied_by(model));
            }
        }
        assert!(report.representative_model.is_some());
        assert_eq!(report.stats.compatible_in_queue, 10);
        assert!(report.stats.executed_iterations <= 5_000);
        assert!(report.stats.models_accepted >= 10);
    }

    #[test]
    fn test_models_preserved_across_calls() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ers = builder(5).default_iterations(5_000).build().unwrap();
        let feedback = feedback();
        let first = ers
            .construct_models(&DecisionContext::new(0), &feedback, &mut rng)
            .unwrap();
        assert!(!first.inconsistent);

        let second = ers
            .construct_models(&DecisionContext::new(1), &feedback, &mut rng)
            .unwrap();
        assert_eq!(second.stats.models_preserved, 5);
        assert_eq!(second.stats.models_discarded, 0);
        assert_eq!(second.stats.executed_iterations, 0);
        assert!(!second.inconsistent);
    }

    #[test]
    fn test_existing_models_dropped_without_revalidation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut ers = builder(5)
            .default_iterations(5_000)
            .validate_already_existing_samples_first(false)
            .build()
            .unwrap();
        let feedback = feedback();
        ers.construct_models(&DecisionContext::new(0), &feedback, &mut rng)
            .unwrap();
        let second = ers
            .construct_models(&DecisionContext::new(1), &feedback, &mut rng)
            .unwrap();
        assert_eq!(second.stats.models_preserved, 0);
        assert!(second.stats.executed_iterations >= 5);
    }

    #[test]
    fn test_new_feedback_discards_models() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ers = builder(20).default_iterations(0).build().unwrap();
        let no_feedback: Vec<PreferenceInformationWrapper> = Vec::new();

        let report = ers
            .construct_models(&DecisionContext::new(0), &no_feedback, &mut rng)
            .unwrap();
        assert!(report.inconsistent);
        assert!(report.models.is_empty());

        let mut ers = builder(20).default_iterations(20).build().unwrap();
        ers.construct_models(&DecisionContext::new(0), &no_feedback, &mut rng)
            .unwrap();
        assert_eq!(ers.queue().no_compatible_models(), 20);

        let feedback = feedback();
        let report = ers
            .construct_models(&DecisionContext::new(1), &feedback, &mut rng)
            .unwrap();
        assert_eq!(
            report.stats.models_preserved + report.stats.models_discarded,
            20
        );
        assert!(report.stats.models_discarded > 0);
    }

    #[test]
    fn test_initial_models_seed_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let initial = vec![
            LNorm::chebyshev(vec![0.5, 0.5]).unwrap(),
            LNorm::chebyshev(vec![0.9, 0.1]).unwrap(),
        ];
        let mut ers = builder(3)
            .default_iterations(0)
            .initial_models(initial)
            .build()
            .unwrap();
        let report = ers
            .construct_models(&DecisionContext::new(0), &feedback(), &mut rng)
            .unwrap();
        assert_eq!(report.models, vec![LNorm::chebyshev(vec![0.5, 0.5]).unwrap()]);
        assert!(report.inconsistent);

        // Seeding twice does not duplicate the model.
        let report = ers
            .construct_models(&DecisionContext::new(1), &feedback(), &mut rng)
            .unwrap();
        assert_eq!(report.models.len(), 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ers = builder(3).build().unwrap();
        let bad = vec![PreferenceInformationWrapper::new(
            4,
            0,
            PairwiseComparison::new(
                Alternative::new("a", vec![0.1, 0.2, 0.3]),
                Alternative::new("b", vec![0.3, 0.2, 0.1]),
            ),
        )];
        assert!(matches!(
            ers.construct_models(&DecisionContext::new(0), &bad, &mut rng),
            Err(PreferenceError::DimensionMismatch {
                id: 4,
                expected: 2,
                actual: 3
            })
        ));

        let ctx = DecisionContext::new(0).with_normalizations(vec![Normalization::unit(); 3]);
        assert!(matches!(
            ers.construct_models(&ctx, &[], &mut rng),
            Err(PreferenceError::Model(ModelError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_normalization_rebinding() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ers = builder(5).default_iterations(5_000).build().unwrap();
        let feedback = feedback();
        let first = ers
            .construct_models(&DecisionContext::new(0), &feedback, &mut rng)
            .unwrap();
        assert!(!first.stats.normalizations_updated);

        let norms = vec![Normalization::new(0.0, 2.0).unwrap(); 2];
        let ctx = DecisionContext::new(1).with_normalizations(norms.clone());
        let report = ers.construct_models(&ctx, &feedback, &mut rng).unwrap();
        assert!(report.stats.normalizations_updated);
        for model in &report.models {
            assert_eq!(model.normalizations(), Some(norms.as_slice()));
        }
    }
}
