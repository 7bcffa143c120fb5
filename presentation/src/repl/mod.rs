//! Interactive trial session

pub mod command;
pub mod input;
mod trial_repl;

pub use command::ReplCommand;
pub use input::LineSource;
pub use trial_repl::{Flow, TrialRepl};
