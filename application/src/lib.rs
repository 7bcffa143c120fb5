//! Application layer for courtroom
//!
//! This crate contains the role agents, use cases, and port definitions.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use agents::{DeliberationPolicy, FixedDeliberation, Jury, JuryNotes, RandomDeliberation};
pub use config::TrialSettings;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    retrieval::{RetrievalError, RetrievalInitializer, RetrievalPort, RetrievalResponse},
    text_generation::{GenerationError, GenerationParams, TextGenerator, UnconfiguredGenerator},
    transcript_store::{PersistenceError, TranscriptStore},
};
pub use use_cases::evaluate_input::EvaluationScorer;
pub use use_cases::run_trial::{
    ObjectionExchange, ProsecutionTurn, StartTrialInput, TrialOrchestrator, TrialOutcome,
    NO_ACTIVE_TRIAL_VERDICT,
};
