//! Infrastructure layer for courtroom
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenAI-compatible text generator, the
//! local legal-document index, JSON transcript storage, the JSONL
//! conversation log and configuration file loading.

pub mod config;
pub mod generation;
pub mod logging;
pub mod persistence;
pub mod retrieval;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileEvaluationConfig, FileLoggingConfig,
    FileModelConfig, FileRetrievalConfig, FileTrialConfig,
};
pub use generation::OpenAiGenerator;
pub use logging::JsonlConversationLogger;
pub use persistence::JsonTranscriptStore;
pub use retrieval::{LocalDocumentIndex, LocalDocumentSource};
