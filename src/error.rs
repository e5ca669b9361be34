//! Error types for ers-evo
//!
//! This module defines all error types used throughout the library.
//!
//! Only configuration and programmer errors are reported through `Err`.
//! Expected outcomes of a construction call (a rejected candidate, a population
//! that could not be completed, a representative model that could not be
//! picked) are carried by [`Report`](crate::constructor::report::Report) values.

use thiserror::Error;

/// Error type for preference model operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Weight vector is not a point of the simplex
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Invalid model parameter (compensation level, normalization, ...)
    #[error("Invalid model parameter: {0}")]
    InvalidParameter(String),
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),
}

/// Top-level error type for preference model construction
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// Model error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration of a named field
    #[error("Invalid configuration for `{field}`: {reason}")]
    Configuration {
        /// Offending configuration field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A required collaborator was not supplied
    #[error("Missing required component: {0}")]
    MissingComponent(&'static str),

    /// Preference information does not match the model dimensionality
    #[error("Preference {id} has {actual} criteria, models have {expected}")]
    DimensionMismatch {
        /// Identifier of the offending preference item
        id: usize,
        /// Number of criteria of the models
        expected: usize,
        /// Number of criteria of the alternative
        actual: usize,
    },

    /// Operation requires a non-empty models queue
    #[error("Models queue is empty")]
    EmptyQueue,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for preference model construction
pub type PrefResult<T> = Result<T, PreferenceError>;

/// Result of an operator application
#[derive(Debug, Clone)]
pub enum OperatorResult<G> {
    /// Operation succeeded
    Success(G),
    /// Operation failed unrecoverably
    Failed(OperatorError),
}

impl<G> OperatorResult<G> {
    /// Converts into a `Result`, keeping the operator error
    pub fn into_result(self) -> Result<G, OperatorError> {
        match self {
            Self::Success(g) => Ok(g),
            Self::Failed(e) => Err(e),
        }
    }
}
