//! Decision-maker feedback
//!
//! This module provides the preference information consumed by the model
//! constructors: alternatives, pairwise comparisons, the iteration-stamped
//! wrappers accepted into the history, and the decision-making context the
//! external orchestrator supplies with every construction call.

pub mod comparison;
pub mod context;
pub mod history;

pub mod prelude {
    pub use super::comparison::*;
    pub use super::context::*;
    pub use super::history::*;
}
