//! Preference model constructors
//!
//! This module provides the Evolutionary Rejection Sampling constructor along
//! with its pluggable parts: the evolutionary model constructor, iteration
//! budgets, and representative model selectors.

pub mod ers;
pub mod evolutionary;
pub mod iterations;
pub mod report;
pub mod representative;

pub mod prelude {
    pub use super::ers::*;
    pub use super::evolutionary::*;
    pub use super::iterations::*;
    pub use super::report::*;
    pub use super::representative::*;
}
