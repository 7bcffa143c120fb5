//! Jury agent: takes notes through the trial and returns the verdict.
//!
//! The decision itself is delegated to a [`DeliberationPolicy`]. The
//! default [`RandomDeliberation`] is a coin flip that ignores the notes;
//! other policies can weigh the notes and transcript instead.

use courtroom_domain::{RoleProfile, Verdict};
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Everything the jury has been told during one trial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JuryNotes {
    pub case_info: Option<String>,
    pub evidence: BTreeMap<String, String>,
    /// Every summary heard per witness, in the order heard
    pub testimony: BTreeMap<String, Vec<String>>,
    pub instructions: Option<String>,
}

/// Strategy that turns notes and transcript into a verdict.
pub trait DeliberationPolicy: Send + Sync {
    fn decide(&self, notes: &JuryNotes, transcript: &str) -> Verdict;
}

/// Uniformly random verdict, independent of everything heard.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDeliberation;

impl DeliberationPolicy for RandomDeliberation {
    fn decide(&self, _notes: &JuryNotes, _transcript: &str) -> Verdict {
        if rand::thread_rng().gen_bool(0.5) {
            Verdict::Guilty
        } else {
            Verdict::NotGuilty
        }
    }
}

/// Always returns the same verdict.
#[derive(Debug, Clone, Copy)]
pub struct FixedDeliberation(pub Verdict);

impl DeliberationPolicy for FixedDeliberation {
    fn decide(&self, _notes: &JuryNotes, _transcript: &str) -> Verdict {
        self.0
    }
}

pub struct Jury {
    profile: RoleProfile,
    policy: Arc<dyn DeliberationPolicy>,
    notes: JuryNotes,
    verdict: Option<Verdict>,
}

impl Jury {
    pub fn new(policy: Arc<dyn DeliberationPolicy>) -> Self {
        Self {
            profile: RoleProfile::jury(),
            policy,
            notes: JuryNotes::default(),
            verdict: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn notes(&self) -> &JuryNotes {
        &self.notes
    }

    /// Forget everything from a previous trial.
    pub fn reset(&mut self) {
        self.notes = JuryNotes::default();
        self.verdict = None;
    }

    pub fn receive_case_info(&mut self, context: &str) {
        self.notes.case_info = Some(context.to_string());
    }

    pub fn receive_evidence(&mut self, evidence_id: &str, description: &str) {
        self.notes
            .evidence
            .insert(evidence_id.to_string(), description.to_string());
    }

    pub fn receive_testimony_summary(&mut self, witness_name: &str, summary: &str) {
        self.notes
            .testimony
            .entry(witness_name.to_string())
            .or_default()
            .push(summary.to_string());
    }

    pub fn receive_instructions(&mut self, instructions: &str) {
        self.notes.instructions = Some(instructions.to_string());
    }

    /// Deliberate over the full transcript and announce the verdict.
    pub fn deliberate_and_decide(&mut self, full_transcript: &str) -> String {
        info!("{} is deliberating", self.profile.name);
        let verdict = self.policy.decide(&self.notes, full_transcript);
        self.verdict = Some(verdict);
        info!("{} has reached a verdict: {}", self.profile.name, verdict.as_str());
        verdict.announcement()
    }

    pub fn get_verdict(&self) -> Option<Verdict> {
        self.verdict
    }
}
