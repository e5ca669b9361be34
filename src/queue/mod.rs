//! Compatibility-ranked model queue
//!
//! This module provides the bounded, sorted population of candidate models
//! kept by the constructors, together with the comparators ranking it and the
//! display-matrix export read by visualization collaborators.

pub mod comparator;
pub mod display;
pub mod models_queue;
pub mod sorted_model;

pub mod prelude {
    pub use super::comparator::*;
    pub use super::display::*;
    pub use super::models_queue::*;
    pub use super::sorted_model::*;
}
