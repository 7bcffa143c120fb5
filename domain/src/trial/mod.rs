//! Trial domain
//!
//! The live state of one courtroom session and the artifacts it produces.
//!
//! - [`state::TrialState`] - all mutable trial state, owned by one orchestrator
//! - [`transcript::Transcript`] - append-only log with its flattened history
//! - [`record::TrialRecord`] - the persisted form of a finished trial

pub mod entities;
pub mod record;
pub mod state;
pub mod transcript;
pub mod value_objects;
