//! Persisted form of a completed trial.

use super::entities::TranscriptEntry;
use super::state::TrialState;
use crate::evaluation::score::PerformanceReport;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in metadata and in transcript file names.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Descriptive fields stored alongside the proceedings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialMetadata {
    pub timestamp: String,
    pub case_context: String,
    pub witness_names: Vec<String>,
    pub evidence_ids: Vec<String>,
}

/// One complete trial as written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRecord {
    pub trial_proceedings: Vec<TranscriptEntry>,
    pub performance_evaluation: PerformanceReport,
    pub metadata: TrialMetadata,
}

impl TrialRecord {
    /// Snapshot the state of a trial as of `at`.
    pub fn capture(state: &TrialState, at: DateTime<Local>) -> Self {
        Self {
            trial_proceedings: state.transcript.entries().to_vec(),
            performance_evaluation: state.performance.clone(),
            metadata: TrialMetadata {
                timestamp: at.format(RECORD_TIMESTAMP_FORMAT).to_string(),
                case_context: state.case_context().to_string(),
                witness_names: state.witnesses.keys().cloned().collect(),
                evidence_ids: state.evidence.keys().cloned().collect(),
            },
        }
    }

    /// Deterministic file name derived from the metadata timestamp.
    pub fn file_name(&self) -> String {
        format!("trial_{}.json", self.metadata.timestamp)
    }
}
