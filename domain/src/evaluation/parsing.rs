//! Rubric response parsing for user evaluations.
//!
//! Extracts per-criterion scores from free-form critique text. Pure domain
//! logic with no I/O, just line-oriented pattern matching. The generation
//! backend does not guarantee any format, so the parser never fails: it
//! degrades to absent scores with the raw text as feedback.
//!
//! # Recognized score forms
//!
//! | Form | Example |
//! |------|---------|
//! | Bare number after the last colon | `Coherence: 7, well organized` |
//! | Slash-ten suffix | `Persuasiveness: 8/10, clear` |
//! | Explicit score label | `Score: 5` |

use super::score::{Criterion, ScoreEntry};
use regex::Regex;
use std::sync::LazyLock;

/// Appended to the raw response when no criterion could be scored.
pub const UNSTRUCTURED_NOTICE: &str = "(Could not reliably parse scores/feedback structure)";

/// Feedback used when the response had no text at all.
pub const EMPTY_RESPONSE_NOTICE: &str = "(No feedback text received)";

/// A one- or two-digit number, optionally followed by `/10`.
static BARE_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:/10)?\b").expect("valid regex"));

/// An explicit `Score: N` label.
static LABELED_SCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Score:\s*(\d{1,2})").expect("valid regex"));

/// Extract a candidate score from a single line.
///
/// The bare form is searched in the text after the last colon; only if it
/// finds nothing is the labeled form tried on the whole line. The result is
/// returned only when it lies in 1..=10.
pub fn extract_score(line: &str) -> Option<u8> {
    let after_colon = line.rsplit(':').next().unwrap_or(line);

    let captured = BARE_SCORE
        .captures(after_colon)
        .or_else(|| LABELED_SCORE.captures(line))?;

    let value: u8 = captured.get(1)?.as_str().parse().ok()?;
    (1..=10).contains(&value).then_some(value)
}

/// Parse a rubric critique into a [`ScoreEntry`].
///
/// Walks the text line by line with a "current criterion" cursor, moved
/// whenever a line names a criterion. The first valid score seen while a
/// criterion is current fills it; later mentions are ignored. Every
/// non-empty line under a criterion is collected as its feedback.
pub fn parse_rubric_response(response: &str) -> ScoreEntry {
    let mut entry = ScoreEntry::default();
    let mut feedback: [Vec<&str>; 3] = Default::default();
    let mut raw_lines = Vec::new();
    let mut current: Option<Criterion> = None;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        raw_lines.push(line);

        if let Some(criterion) = Criterion::detect(line) {
            current = Some(criterion);
        }

        let Some(criterion) = current else {
            continue;
        };

        if entry.score(criterion).is_none()
            && let Some(score) = extract_score(line)
        {
            entry.set_score(criterion, score);
        }

        feedback[slot(criterion)].push(line);
    }

    let parsed = Criterion::ALL
        .iter()
        .filter(|c| entry.score(**c).is_some())
        .map(|c| format!("{}: {}", c.label(), feedback[slot(*c)].join(" ")))
        .collect::<Vec<_>>();

    entry.feedback = if !parsed.is_empty() {
        parsed.join("\n")
    } else if raw_lines.is_empty() {
        EMPTY_RESPONSE_NOTICE.to_string()
    } else {
        format!("{}\n{}", raw_lines.join("\n"), UNSTRUCTURED_NOTICE)
    };

    entry
}

fn slot(criterion: Criterion) -> usize {
    match criterion {
        Criterion::Persuasiveness => 0,
        Criterion::FactualGrounding => 1,
        Criterion::Coherence => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_score Tests ====================

    #[test]
    fn test_extract_score_forms() {
        assert_eq!(extract_score("Persuasiveness: 8/10 — clear and compelling."), Some(8));
        assert_eq!(extract_score("Factual Grounding: Score: 5"), Some(5));
        assert_eq!(extract_score("Coherence: 7, well organized"), Some(7));
        assert_eq!(extract_score("10/10"), Some(10));
    }

    #[test]
    fn test_extract_score_rejects_out_of_range() {
        assert_eq!(extract_score("Persuasiveness: 0"), None);
        assert_eq!(extract_score("Persuasiveness: 42"), None);
        assert_eq!(extract_score("Persuasiveness: 123"), None);
    }

    #[test]
    fn test_extract_score_without_number() {
        assert_eq!(extract_score("Persuasiveness: strong opening"), None);
        assert_eq!(extract_score(""), None);
    }

    // ==================== parse_rubric_response Tests ====================

    #[test]
    fn test_parse_canonical_rubric() {
        let response = "Persuasiveness: 8/10 — clear and compelling.\n\
                        Factual Grounding: Score: 5\n\
                        Coherence: 7, well organized";
        let entry = parse_rubric_response(response);

        assert_eq!(entry.persuasiveness, Some(8));
        assert_eq!(entry.factual_grounding, Some(5));
        assert_eq!(entry.coherence, Some(7));
        assert!(entry.feedback.contains("Persuasiveness: Persuasiveness: 8/10 — clear and compelling."));
        assert!(entry.feedback.contains("Factual Grounding: Factual Grounding: Score: 5"));
        assert!(entry.feedback.contains("Coherence: Coherence: 7, well organized"));
    }

    #[test]
    fn test_first_score_wins_per_criterion() {
        let response = "Persuasiveness: 6\nPersuasiveness revisited: 9\nCoherence: 4";
        let entry = parse_rubric_response(response);
        assert_eq!(entry.persuasiveness, Some(6));
        assert_eq!(entry.coherence, Some(4));
        assert_eq!(entry.factual_grounding, None);
    }

    #[test]
    fn test_justification_lines_join_feedback() {
        let response = "- Persuasiveness:\n  Score: 7\n  Sets up the alibi well.\n- Coherence: 6/10\n  Mostly clear.";
        let entry = parse_rubric_response(response);

        assert_eq!(entry.persuasiveness, Some(7));
        assert_eq!(entry.coherence, Some(6));
        assert!(entry.feedback.contains("Persuasiveness: - Persuasiveness: Score: 7 Sets up the alibi well."));
        assert!(entry.feedback.contains("Coherence: - Coherence: 6/10 Mostly clear."));
        // Factual grounding was never scored, so it contributes no feedback line
        assert!(!entry.feedback.contains("Factual Grounding:"));
    }

    #[test]
    fn test_lines_before_any_criterion_are_not_scored() {
        let response = "Overall 3 points stand out.\nPersuasiveness: 8";
        let entry = parse_rubric_response(response);
        assert_eq!(entry.persuasiveness, Some(8));
    }

    #[test]
    fn test_unstructured_response_falls_back_to_raw_text() {
        let response = "This statement is quite good overall.\nIt could use more evidence.";
        let entry = parse_rubric_response(response);

        assert!(!entry.is_scored());
        assert!(entry.feedback.starts_with("This statement is quite good overall."));
        assert!(entry.feedback.ends_with(UNSTRUCTURED_NOTICE));
    }

    #[test]
    fn test_empty_response() {
        let entry = parse_rubric_response("  \n\n");
        assert!(!entry.is_scored());
        assert_eq!(entry.feedback, EMPTY_RESPONSE_NOTICE);
    }
}
