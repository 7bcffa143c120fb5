//! Core domain concepts shared across all subdomains.
//!
//! - [`error::TrialError`]: descriptive failures of trial operations
//! - [`string`]: display helpers

pub mod error;
pub mod string;
