//! Preference model abstractions and implementations
//!
//! This module provides the `InternalModel` trait, the weighted L-norm
//! scalarizing function and the random model generators.

pub mod generator;
pub mod lnorm;
pub mod normalization;
pub mod traits;

pub mod prelude {
    pub use super::generator::*;
    pub use super::lnorm::*;
    pub use super::normalization::*;
    pub use super::traits::*;
}
