//! Trial value objects - small immutable types passed across layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a witness is being questioned.
///
/// Cross-examination asks the witness to answer only what was asked and
/// volunteer nothing; direct examination lets them be cooperative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExaminationMode {
    #[default]
    Direct,
    Cross,
}

impl ExaminationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExaminationMode::Direct => "direct",
            ExaminationMode::Cross => "cross",
        }
    }

    /// Participle used in the witness prompt ("being examined").
    pub fn participle(&self) -> &'static str {
        match self {
            ExaminationMode::Direct => "examined",
            ExaminationMode::Cross => "cross-examined",
        }
    }

    pub fn is_cross(&self) -> bool {
        matches!(self, ExaminationMode::Cross)
    }
}

impl fmt::Display for ExaminationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase of the trial the judge is instructing the court for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionPhase {
    Opening,
    Closing,
}

impl InstructionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionPhase::Opening => "opening",
            InstructionPhase::Closing => "closing",
        }
    }
}

impl fmt::Display for InstructionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Jury decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Guilty,
    NotGuilty,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Guilty => "Guilty",
            Verdict::NotGuilty => "Not Guilty",
        }
    }

    /// Text the jury speaks into the transcript.
    pub fn announcement(&self) -> String {
        format!("Verdict: {}", self.as_str())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only snapshot of where the trial stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialStatus {
    pub active: bool,
    pub current_round: u32,
    pub max_rounds: u32,
    pub case_context: Option<String>,
}
