//! Evaluation domain
//!
//! Scoring of user-submitted arguments on three criteria.
//!
//! - [`score`] - [`ScoreEntry`](score::ScoreEntry) and the per-trial
//!   [`PerformanceReport`](score::PerformanceReport)
//! - [`parsing`] - free-text rubric parser

pub mod parsing;
pub mod score;
