//! # ers-evo
//!
//! Evolutionary Rejection Sampling of preference models for interactive
//! multi-objective optimization.
//!
//! A decision maker compares pairs of alternatives; the library maintains a
//! bounded population of scalarizing-function models (weighted L-norms) that
//! reproduce every comparison, kept diverse by ranking models on their
//! distance to their nearest neighbours.
//!
//! ## Core Concepts
//!
//! - **Compatibility**: a model is compatible when it scores every preferred alternative strictly better
//! - **Models queue**: a sorted, bounded population with cached nearest-neighbour lists
//! - **Rejection sampling**: random candidates fill the queue, tournament reproduction refines it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ers_evo::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut history = PreferenceHistory::new();
//! history.add(
//!     PairwiseComparison::new(
//!         Alternative::new("a", vec![0.4, 0.4]),
//!         Alternative::new("b", vec![0.2, 0.7]),
//!     ),
//!     0,
//! );
//!
//! let mut ers = ErsBuilder::<LNorm>::new()
//!     .feasible_samples_to_generate(50)
//!     .generator(LNormGenerator::chebyshev(2)?)
//!     .compatibility_analyzer(MostDiscriminating)
//!     .evolutionary_constructor(EvolutionaryModelConstructor::standard())
//!     .build()?;
//!
//! let report = ers.construct_models(&DecisionContext::new(0), history.entries(), &mut rng)?;
//! ```

pub mod compatibility;
pub mod constructor;
pub mod error;
pub mod model;
pub mod operators;
pub mod preference;
pub mod queue;
pub mod similarity;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::compatibility::*;
    pub use crate::constructor::prelude::*;
    pub use crate::error::*;
    pub use crate::model::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::preference::prelude::*;
    pub use crate::queue::prelude::*;
    pub use crate::similarity::*;
}
