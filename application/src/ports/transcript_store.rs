//! Transcript persistence port

use courtroom_domain::TrialRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to persist a finished trial.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write transcript {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize transcript: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage for completed trials.
///
/// One artifact per trial; implementations should write it atomically.
pub trait TranscriptStore: Send + Sync {
    /// Persist the record and return where it was written.
    fn save(&self, record: &TrialRecord) -> Result<PathBuf, PersistenceError>;
}
