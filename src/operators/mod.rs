//! Evolutionary operators
//!
//! This module provides the selection, crossover, and mutation operators used
//! to breed candidate models, and the offspring constructor combining them.

pub mod crossover;
pub mod mutation;
pub mod offspring;
pub mod selection;
pub mod traits;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::offspring::*;
    pub use super::selection::*;
    pub use super::traits::*;
}
