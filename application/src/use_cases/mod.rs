//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod error;
pub mod evaluate;
pub mod generate;
pub mod run_refinement;
pub mod run_round;
pub(crate) mod shared;
pub mod synthesize;
