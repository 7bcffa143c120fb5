//! Trial entities - records that are created once and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One spoken or system line of the trial transcript.
///
/// Immutable once created; the timestamp is the moment it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Creates an entry stamped with the current UTC time.
    pub fn now(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// `"speaker: content"` projection used as model context.
    pub fn history_line(&self) -> String {
        format!("{}: {}", self.speaker, self.content)
    }

    /// `"speaker (timestamp): content"` projection used for deliberation.
    pub fn timestamped_line(&self) -> String {
        format!(
            "{} ({}): {}",
            self.speaker,
            self.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            self.content
        )
    }
}

/// A witness and the statement they gave before trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRecord {
    /// Unique key within a trial
    pub name: String,
    /// Initial statement; never changes during the trial
    pub testimony: String,
}

impl WitnessRecord {
    pub fn new(name: impl Into<String>, testimony: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            testimony: testimony.into(),
        }
    }

    /// Speaker label used for this witness in the transcript.
    pub fn speaker_label(&self) -> String {
        format!("Witness ({})", self.name)
    }
}
