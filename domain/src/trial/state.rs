//! Live trial state.

use super::entities::WitnessRecord;
use super::transcript::Transcript;
use super::value_objects::TrialStatus;
use crate::evaluation::score::PerformanceReport;
use std::collections::BTreeMap;

/// Everything a single trial knows, owned by exactly one orchestrator.
///
/// Created (and wholly replaced) when a trial starts; mutated only by
/// orchestrator operations; left readable after the trial ends until the
/// next one starts.
#[derive(Debug, Clone, Default)]
pub struct TrialState {
    /// Set once at trial start
    pub case_context: Option<String>,
    pub current_round: u32,
    pub active: bool,
    /// Re-adding a name overwrites the earlier record
    pub witnesses: BTreeMap<String, WitnessRecord>,
    current_witness: Option<String>,
    /// Evidence id -> description; re-adding an id overwrites it
    pub evidence: BTreeMap<String, String>,
    pub transcript: Transcript,
    pub performance: PerformanceReport,
}

impl TrialState {
    /// Fresh, active state for a new trial.
    pub fn begin(case_context: impl Into<String>) -> Self {
        Self {
            case_context: Some(case_context.into()),
            active: true,
            ..Default::default()
        }
    }

    pub fn case_context(&self) -> &str {
        self.case_context.as_deref().unwrap_or_default()
    }

    pub fn add_witness(&mut self, record: WitnessRecord) {
        self.witnesses.insert(record.name.clone(), record);
    }

    pub fn add_evidence(&mut self, id: impl Into<String>, description: impl Into<String>) {
        self.evidence.insert(id.into(), description.into());
    }

    /// Put a witness on the stand. Returns the record, or `None` if no
    /// witness has that exact name (the stand is left unchanged).
    pub fn seat_witness(&mut self, name: &str) -> Option<&WitnessRecord> {
        if !self.witnesses.contains_key(name) {
            return None;
        }
        self.current_witness = Some(name.to_string());
        self.witnesses.get(name)
    }

    /// The witness currently on the stand, if any.
    pub fn current_witness(&self) -> Option<&WitnessRecord> {
        self.current_witness
            .as_deref()
            .and_then(|name| self.witnesses.get(name))
    }

    pub fn status(&self, max_rounds: u32) -> TrialStatus {
        TrialStatus {
            active: self.active,
            current_round: self.current_round,
            max_rounds,
            case_context: self.case_context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_active_with_round_zero() {
        let state = TrialState::begin("Theft case");
        assert!(state.active);
        assert_eq!(state.current_round, 0);
        assert_eq!(state.case_context(), "Theft case");
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_seat_witness_requires_exact_name() {
        let mut state = TrialState::begin("Theft case");
        state.add_witness(WitnessRecord::new("Alice", "I saw the defendant at 9pm"));

        assert!(state.seat_witness("alice").is_none());
        assert!(state.current_witness().is_none());

        let seated = state.seat_witness("Alice").map(|w| w.name.clone());
        assert_eq!(seated.as_deref(), Some("Alice"));
        assert_eq!(state.current_witness().map(|w| w.name.as_str()), Some("Alice"));
    }

    #[test]
    fn test_readding_keys_overwrites() {
        let mut state = TrialState::begin("Theft case");
        state.add_evidence("Exhibit A", "security footage");
        state.add_evidence("Exhibit A", "enhanced security footage");
        state.add_witness(WitnessRecord::new("Bob", "first"));
        state.add_witness(WitnessRecord::new("Bob", "second"));

        assert_eq!(state.evidence.len(), 1);
        assert_eq!(state.evidence["Exhibit A"], "enhanced security footage");
        assert_eq!(state.witnesses["Bob"].testimony, "second");
    }

    #[test]
    fn test_default_state_is_inactive() {
        let state = TrialState::default();
        let status = state.status(5);
        assert!(!status.active);
        assert_eq!(status.max_rounds, 5);
        assert_eq!(status.case_context, None);
    }
}
