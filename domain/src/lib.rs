//! Domain layer for courtroom
//!
//! This crate contains the trial entities, evaluation logic, and prompt templates.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Trial
//!
//! A trial is one session from opening to verdict. Its state is a
//! [`TrialState`]: case context, witnesses, evidence, the append-only
//! [`Transcript`], and the user's [`PerformanceReport`].
//!
//! ## Evaluation
//!
//! User-submitted text (the case description and each defense statement) is
//! scored on three criteria. [`parse_rubric_response`] turns free-form critique
//! text into a [`ScoreEntry`].
//!
//! ## Prompts
//!
//! Every role prompt is rendered from [`PromptTemplates`], a data-driven map of
//! [`TemplateId`] to template text.

pub mod core;
pub mod evaluation;
pub mod prompt;
pub mod trial;
pub mod util;

// Re-export commonly used types
pub use core::error::TrialError;
pub use evaluation::{
    parsing::parse_rubric_response,
    score::{Criterion, InputKind, PerformanceReport, ScoreEntry},
};
pub use prompt::{
    role::RoleProfile,
    template::{PromptFields, PromptTemplates, TemplateId},
};
pub use trial::{
    entities::{TranscriptEntry, WitnessRecord},
    record::{TrialMetadata, TrialRecord},
    state::TrialState,
    transcript::Transcript,
    value_objects::{ExaminationMode, InstructionPhase, TrialStatus, Verdict},
};
