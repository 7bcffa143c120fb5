//! Judge agent: procedure, rulings, instructions and bench verdicts.

use super::base::{recent_history, AgentCore, DocumentLabels};
use crate::ports::retrieval::RetrievalPort;
use courtroom_domain::prompt::template::{is_pass_reply, NO_COMMENT_MARKER};
use courtroom_domain::{InstructionPhase, TemplateId};
use tracing::warn;

const PROCEEDINGS_DOCS: DocumentLabels = DocumentLabels {
    absent: "No relevant documents found or queried.",
    found: "Relevant Procedural Info from Docs",
    failed: "Error querying documents for procedural context.",
};

const RULING_DOCS: DocumentLabels = DocumentLabels {
    absent: "No relevant documents queried for ruling.",
    found: "Relevant Legal Basis from Documents",
    failed: "Error querying documents for ruling basis.",
};

pub struct Judge {
    core: AgentCore,
}

impl Judge {
    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    /// Comment on the proceedings after a prosecution turn.
    ///
    /// `None` means the court stays silent, which also covers a failed call.
    pub async fn process_context(
        &self,
        case_context: &str,
        interaction_history: &str,
        retrieval: Option<&dyn RetrievalPort>,
    ) -> Option<String> {
        let query_fields = self
            .core
            .base_fields()
            .with("case_context", case_context)
            .with("recent_history", recent_history(interaction_history));
        let document_context = self
            .core
            .consult_documents(
                retrieval,
                TemplateId::JudgeProceedingsQuery,
                &query_fields,
                PROCEEDINGS_DOCS,
            )
            .await;

        let fields = query_fields
            .with("interaction_history", interaction_history)
            .with("document_context", document_context);

        match self.core.speak(TemplateId::JudgeProceedings, &fields).await {
            Ok(reply) if is_pass_reply(&reply, NO_COMMENT_MARKER) => None,
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("Judge commentary unavailable: {}", e);
                None
            }
        }
    }

    pub async fn rule_on_objection(
        &self,
        objection: &str,
        interaction_history: &str,
        retrieval: Option<&dyn RetrievalPort>,
    ) -> String {
        let query_fields = self
            .core
            .base_fields()
            .with("objection", objection)
            .with("recent_history", recent_history(interaction_history));
        let document_context = self
            .core
            .consult_documents(retrieval, TemplateId::JudgeRulingQuery, &query_fields, RULING_DOCS)
            .await;

        let fields = query_fields
            .with("interaction_history", interaction_history)
            .with("document_context", document_context);
        self.core
            .speak_or_placeholder(TemplateId::JudgeRuling, &fields)
            .await
    }

    /// Reasoned verdict from the full timestamped transcript.
    pub async fn deliver_verdict(&self, transcript: &str) -> String {
        let fields = self.core.base_fields().with("transcript", transcript);
        self.core
            .speak_or_placeholder(TemplateId::JudgeVerdict, &fields)
            .await
    }

    pub async fn provide_instructions(&self, phase: InstructionPhase) -> String {
        let fields = self.core.base_fields().with("phase", phase.as_str());
        self.core
            .speak_or_placeholder(TemplateId::JudgeInstructions, &fields)
            .await
    }
}
