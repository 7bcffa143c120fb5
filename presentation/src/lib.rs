//! Presentation layer for courtroom
//!
//! This crate contains the CLI definition, the interactive trial REPL,
//! console formatting and progress reporting.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use repl::TrialRepl;
