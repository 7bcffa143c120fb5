//! Evaluate Input use case
//!
//! Scores user-submitted text (the case description, each defense statement)
//! on persuasiveness, factual grounding and coherence.

use crate::ports::text_generation::{GenerationParams, TextGenerator};
use courtroom_domain::{
    parse_rubric_response, InputKind, PromptFields, PromptTemplates, ScoreEntry, TemplateId,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Rubric scorer backed by an optional text generator.
///
/// Without a backend every evaluation is skipped (all scores absent), which
/// keeps "not scored" distinct from the zero scores given to empty input.
pub struct EvaluationScorer {
    generator: Option<Arc<dyn TextGenerator>>,
    templates: Arc<PromptTemplates>,
    params: GenerationParams,
}

impl EvaluationScorer {
    pub fn new(generator: Arc<dyn TextGenerator>, params: GenerationParams) -> Self {
        Self {
            generator: Some(generator),
            templates: Arc::new(PromptTemplates::default()),
            params,
        }
    }

    /// Scorer that skips every evaluation.
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            templates: Arc::new(PromptTemplates::default()),
            params: GenerationParams::default(),
        }
    }

    pub fn with_templates(mut self, templates: Arc<PromptTemplates>) -> Self {
        self.templates = templates;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Score one piece of user input. Never fails: problems are reported in
    /// the entry's feedback with the scores left absent.
    pub async fn evaluate(
        &self,
        kind: InputKind,
        user_input: &str,
        interaction_history: &str,
    ) -> ScoreEntry {
        let Some(generator) = &self.generator else {
            debug!("Skipping {} evaluation: no backend", kind);
            return ScoreEntry::skipped();
        };

        if user_input.trim().is_empty() {
            return ScoreEntry::empty_input();
        }

        let template = match kind {
            InputKind::CaseDescription => TemplateId::EvaluateCaseDescription,
            InputKind::DefenseStatement => TemplateId::EvaluateDefenseStatement,
        };
        let fields = PromptFields::new()
            .with("user_input", user_input)
            .with("interaction_history", interaction_history);
        let prompt = self.templates.render(template, &fields);

        match generator.generate(&prompt, self.params).await {
            Ok(response) => {
                let entry = parse_rubric_response(&response);
                debug!(
                    kind = %kind,
                    persuasiveness = ?entry.persuasiveness,
                    factual_grounding = ?entry.factual_grounding,
                    coherence = ?entry.coherence,
                    "Evaluation parsed"
                );
                entry
            }
            Err(e) => {
                warn!("Evaluation of {} failed: {}", kind, e);
                ScoreEntry::failed(e)
            }
        }
    }
}
