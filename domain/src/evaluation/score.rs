//! Score entries and the user's performance report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback recorded when no evaluation backend is configured.
pub const EVALUATION_SKIPPED: &str = "Evaluation skipped: no evaluation backend configured.";

/// Feedback recorded for empty or whitespace-only input.
pub const NO_INPUT_PROVIDED: &str = "No input provided.";

/// One of the three rubric criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Persuasiveness,
    FactualGrounding,
    Coherence,
}

impl Criterion {
    /// All criteria in report order.
    pub const ALL: [Criterion; 3] = [
        Criterion::Persuasiveness,
        Criterion::FactualGrounding,
        Criterion::Coherence,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Persuasiveness => "Persuasiveness",
            Criterion::FactualGrounding => "Factual Grounding",
            Criterion::Coherence => "Coherence",
        }
    }

    /// Detect which criterion a rubric line is talking about.
    ///
    /// Matching is case-insensitive; "factual" alone counts as factual grounding.
    pub fn detect(line: &str) -> Option<Criterion> {
        let lower = line.to_lowercase();
        if lower.contains("persuasiveness") {
            Some(Criterion::Persuasiveness)
        } else if lower.contains("factual") {
            Some(Criterion::FactualGrounding)
        } else if lower.contains("coherence") {
            Some(Criterion::Coherence)
        } else {
            None
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Kind of user input being evaluated; selects the rubric prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    CaseDescription,
    DefenseStatement,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::CaseDescription => "case description",
            InputKind::DefenseStatement => "defense statement",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rubric evaluation of one piece of user-submitted text.
///
/// A score is `None` when it was not scored (parser could not find it, or
/// evaluation was skipped or failed). `Some(0)` only appears for empty input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub persuasiveness: Option<u8>,
    pub factual_grounding: Option<u8>,
    pub coherence: Option<u8>,
    pub feedback: String,
}

impl ScoreEntry {
    /// Entry with no scores and the given feedback.
    pub fn unscored(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ..Default::default()
        }
    }

    /// Entry for a trial without an evaluation backend.
    pub fn skipped() -> Self {
        Self::unscored(EVALUATION_SKIPPED)
    }

    /// Entry for empty input: the one case where zero is a real score.
    pub fn empty_input() -> Self {
        Self {
            persuasiveness: Some(0),
            factual_grounding: Some(0),
            coherence: Some(0),
            feedback: NO_INPUT_PROVIDED.to_string(),
        }
    }

    /// Entry for a failed evaluation call.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::unscored(format!("Evaluation failed: {}", reason))
    }

    pub fn score(&self, criterion: Criterion) -> Option<u8> {
        match criterion {
            Criterion::Persuasiveness => self.persuasiveness,
            Criterion::FactualGrounding => self.factual_grounding,
            Criterion::Coherence => self.coherence,
        }
    }

    pub fn set_score(&mut self, criterion: Criterion, value: u8) {
        let slot = match criterion {
            Criterion::Persuasiveness => &mut self.persuasiveness,
            Criterion::FactualGrounding => &mut self.factual_grounding,
            Criterion::Coherence => &mut self.coherence,
        };
        *slot = Some(value);
    }

    /// True when at least one criterion received a score.
    pub fn is_scored(&self) -> bool {
        Criterion::ALL.iter().any(|c| self.score(*c).is_some())
    }
}

/// Scores for everything the user submitted during one trial.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub case_description_eval: ScoreEntry,
    /// One entry per defense statement, in submission order
    pub defense_statement_evals: Vec<ScoreEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_criterion() {
        assert_eq!(Criterion::detect("PERSUASIVENESS: 8"), Some(Criterion::Persuasiveness));
        assert_eq!(Criterion::detect("Factual Grounding: 5"), Some(Criterion::FactualGrounding));
        assert_eq!(Criterion::detect("factual basis is thin"), Some(Criterion::FactualGrounding));
        assert_eq!(Criterion::detect("- coherence: 7"), Some(Criterion::Coherence));
        assert_eq!(Criterion::detect("Overall a fine statement."), None);
    }

    #[test]
    fn test_empty_input_is_zero_not_absent() {
        let entry = ScoreEntry::empty_input();
        assert_eq!(entry.persuasiveness, Some(0));
        assert_eq!(entry.factual_grounding, Some(0));
        assert_eq!(entry.coherence, Some(0));
        assert_eq!(entry.feedback, "No input provided.");
    }

    #[test]
    fn test_skipped_has_no_scores() {
        let entry = ScoreEntry::skipped();
        assert!(!entry.is_scored());
        assert_eq!(entry.feedback, EVALUATION_SKIPPED);
    }

    #[test]
    fn test_score_entry_serializes_snake_case() {
        let mut entry = ScoreEntry::unscored("ok");
        entry.set_score(Criterion::FactualGrounding, 5);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["factual_grounding"], 5);
        assert!(value["persuasiveness"].is_null());
    }

    #[test]
    fn test_performance_report_serializes_camel_case() {
        let report = PerformanceReport::default();
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("caseDescriptionEval").is_some());
        assert!(value["defenseStatementEvals"].as_array().unwrap().is_empty());
    }
}
