//! Structured trial event log port
//!
//! Every transcript append, every evaluation and the start and end of each
//! trial become one [`ConversationEvent`]. Diagnostics still go through
//! `tracing`; this log is the machine-readable record of the proceedings.

use courtroom_domain::{InputKind, ScoreEntry, TranscriptEntry};
use serde_json::{Value, json};
use std::path::Path;

/// One trial event. Adapters add the timestamp when writing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEvent {
    /// `trial_started`, `transcript_entry`, `evaluation` or `trial_ended`
    pub event_type: &'static str,
    /// Event-specific fields, always a JSON object
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn trial_started(
        case_context: &str,
        witnesses: &[String],
        evidence_ids: &[&String],
        retrieval: bool,
    ) -> Self {
        Self::new(
            "trial_started",
            json!({
                "case_context": case_context,
                "witnesses": witnesses,
                "evidence": evidence_ids,
                "retrieval": retrieval,
            }),
        )
    }

    pub fn transcript_entry(entry: &TranscriptEntry) -> Self {
        Self::new(
            "transcript_entry",
            json!({
                "speaker": entry.speaker,
                "content": entry.content,
            }),
        )
    }

    pub fn evaluation(kind: InputKind, score: &ScoreEntry) -> Self {
        Self::new(
            "evaluation",
            json!({
                "input": kind.as_str(),
                "score": score,
            }),
        )
    }

    pub fn trial_ended(verdict: &str, rounds: u32, saved_to: Option<&Path>) -> Self {
        Self::new(
            "trial_ended",
            json!({
                "verdict": verdict,
                "rounds": rounds,
                "saved_to": saved_to.map(|p| p.display().to_string()),
            }),
        )
    }
}

/// Sink for trial events.
///
/// `log` is synchronous and infallible: a broken log never interrupts a
/// trial, so adapters swallow their own write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_entry_carries_speaker_and_content() {
        let entry = TranscriptEntry::now("Judge", "Court is in session.");
        let event = ConversationEvent::transcript_entry(&entry);

        assert_eq!(event.event_type, "transcript_entry");
        assert_eq!(event.payload["speaker"], "Judge");
        assert_eq!(event.payload["content"], "Court is in session.");
    }

    #[test]
    fn evaluation_embeds_the_score_entry() {
        let event =
            ConversationEvent::evaluation(InputKind::DefenseStatement, &ScoreEntry::empty_input());

        assert_eq!(event.payload["input"], InputKind::DefenseStatement.as_str());
        assert_eq!(event.payload["score"]["persuasiveness"], 0);
    }

    #[test]
    fn trial_ended_without_save_has_null_path() {
        let event = ConversationEvent::trial_ended("Verdict: Guilty", 2, None);
        assert!(event.payload["saved_to"].is_null());
        assert_eq!(event.payload["rounds"], 2);
    }
}
