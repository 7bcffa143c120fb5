//! Shared prompt-assembly and generation plumbing for role agents.

use crate::ports::retrieval::RetrievalPort;
use crate::ports::text_generation::{GenerationError, GenerationParams, TextGenerator};
use courtroom_domain::util::tail_chars;
use courtroom_domain::{PromptFields, PromptTemplates, RoleProfile, TemplateId};
use std::sync::Arc;
use tracing::{debug, warn};

/// How much of the interaction history is quoted in retrieval queries.
pub const QUERY_HISTORY_CHARS: usize = 200;

/// Document-context strings substituted into a retrieval-augmented prompt.
#[derive(Debug, Clone, Copy)]
pub struct DocumentLabels {
    /// Used when no retrieval index is available
    pub absent: &'static str,
    /// Prefix for the index's answer
    pub found: &'static str,
    /// Used when the query fails
    pub failed: &'static str,
}

/// Everything an agent needs to turn a template into generated text.
#[derive(Clone)]
pub struct AgentCore {
    profile: RoleProfile,
    generator: Arc<dyn TextGenerator>,
    templates: Arc<PromptTemplates>,
    params: GenerationParams,
    max_response_length: usize,
}

impl AgentCore {
    pub fn new(
        profile: RoleProfile,
        generator: Arc<dyn TextGenerator>,
        templates: Arc<PromptTemplates>,
        params: GenerationParams,
        max_response_length: usize,
    ) -> Self {
        Self {
            profile,
            generator,
            templates,
            params,
            max_response_length,
        }
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Fields every role template may use.
    pub fn base_fields<'a>(&self) -> PromptFields<'a> {
        PromptFields::new().with("max_length", self.max_response_length.to_string())
    }

    /// Render the role preamble followed by the given template.
    pub fn render(&self, id: TemplateId, fields: &PromptFields<'_>) -> String {
        let identity = PromptFields::new()
            .with("name", self.profile.name.as_str())
            .with("role", self.profile.role.as_str())
            .with("goal", self.profile.goal.as_str())
            .with("persona", self.profile.persona.as_str());

        let mut prompt = self.templates.render(TemplateId::RolePreamble, &identity);
        prompt.push_str(&self.templates.render(id, fields));
        prompt
    }

    /// Render and generate; the reply is trimmed and otherwise returned verbatim.
    pub async fn speak(
        &self,
        id: TemplateId,
        fields: &PromptFields<'_>,
    ) -> Result<String, GenerationError> {
        let prompt = self.render(id, fields);
        debug!(role = %self.profile.name, template = ?id, "Generating statement");

        let reply = self.generator.generate(&prompt, self.params).await?;
        Ok(reply.trim().to_string())
    }

    /// Like [`speak`](Self::speak), but a failed call becomes a placeholder
    /// statement so the trial can continue.
    pub async fn speak_or_placeholder(&self, id: TemplateId, fields: &PromptFields<'_>) -> String {
        match self.speak(id, fields).await {
            Ok(text) => text,
            Err(e) => {
                warn!(role = %self.profile.name, "Generation failed: {}", e);
                self.placeholder(&e)
            }
        }
    }

    pub fn placeholder(&self, error: &GenerationError) -> String {
        format!("[{} is unable to respond: {}]", self.profile.name, error)
    }

    /// Query the document index, returning text for the prompt's document
    /// context. Never fails: absence and errors become explanatory strings.
    pub async fn consult_documents(
        &self,
        retrieval: Option<&dyn RetrievalPort>,
        query_id: TemplateId,
        fields: &PromptFields<'_>,
        labels: DocumentLabels,
    ) -> String {
        let Some(index) = retrieval else {
            return labels.absent.to_string();
        };

        let query = self.templates.render(query_id, fields);
        match index.query(&query).await {
            Ok(response) => {
                debug!(role = %self.profile.name, query = %query, "Document query answered");
                format!("{}: {}", labels.found, response.response_text)
            }
            Err(e) => {
                warn!(role = %self.profile.name, "Document query failed: {}", e);
                labels.failed.to_string()
            }
        }
    }
}

/// The tail of the interaction history quoted in retrieval queries.
pub fn recent_history(interaction_history: &str) -> &str {
    tail_chars(interaction_history, QUERY_HISTORY_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeRetrieval, ScriptedGenerator};

    const LABELS: DocumentLabels = DocumentLabels {
        absent: "none",
        found: "Found",
        failed: "broken",
    };

    fn core(generator: Arc<ScriptedGenerator>) -> AgentCore {
        AgentCore::new(
            RoleProfile::judge(),
            generator,
            Arc::new(PromptTemplates::default()),
            GenerationParams::default(),
            500,
        )
    }

    #[tokio::test]
    async fn speak_prepends_persona_and_trims() {
        let generator = Arc::new(ScriptedGenerator::constant("  Order.  \n"));
        let agent = core(generator.clone());

        let fields = agent.base_fields().with("phase", "opening");
        let reply = agent.speak(TemplateId::JudgeInstructions, &fields).await.unwrap();

        assert_eq!(reply, "Order.");
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.starts_with("You are Judge, acting as Court Judge."));
        assert!(prompt.contains("highly respected judge"));
        assert!(prompt.contains("Maximum length: 500 characters."));
    }

    #[tokio::test]
    async fn failed_generation_becomes_placeholder() {
        let generator = Arc::new(ScriptedGenerator::failing(GenerationError::Timeout));
        let agent = core(generator);

        let reply = agent
            .speak_or_placeholder(TemplateId::JudgeInstructions, &agent.base_fields())
            .await;
        assert_eq!(reply, "[Judge is unable to respond: Timeout]");
    }

    #[tokio::test]
    async fn consult_documents_degrades() {
        let agent = core(Arc::new(ScriptedGenerator::constant("")));
        let fields = PromptFields::new().with("objection", "hearsay").with("recent_history", "");

        let absent = agent
            .consult_documents(None, TemplateId::JudgeRulingQuery, &fields, LABELS)
            .await;
        assert_eq!(absent, "none");

        let failing = FakeRetrieval::failing();
        let failed = agent
            .consult_documents(Some(&failing), TemplateId::JudgeRulingQuery, &fields, LABELS)
            .await;
        assert_eq!(failed, "broken");

        let index = FakeRetrieval::answering("Rule 802 excludes hearsay.");
        let found = agent
            .consult_documents(Some(&index), TemplateId::JudgeRulingQuery, &fields, LABELS)
            .await;
        assert_eq!(found, "Found: Rule 802 excludes hearsay.");
        assert!(index.queries.lock().unwrap()[0].contains("'hearsay'"));
    }

    #[test]
    fn recent_history_is_bounded() {
        let history = "x".repeat(1000);
        assert_eq!(recent_history(&history).chars().count(), QUERY_HISTORY_CHARS);
        assert_eq!(recent_history("short"), "short");
    }
}
