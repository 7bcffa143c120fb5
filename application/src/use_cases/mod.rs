//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod evaluate_input;
pub mod run_trial;
