//! Prosecutor agent: arguments, objections and cross-examination questions.

use super::base::{recent_history, AgentCore, DocumentLabels};
use crate::ports::retrieval::RetrievalPort;
use courtroom_domain::prompt::template::{is_pass_reply, NO_OBJECTION_MARKER};
use courtroom_domain::TemplateId;
use tracing::{debug, warn};

const ARGUMENT_DOCS: DocumentLabels = DocumentLabels {
    absent: "No relevant documents found or queried.",
    found: "Relevant Document Info",
    failed: "Error querying documents.",
};

const OBJECTION_DOCS: DocumentLabels = DocumentLabels {
    absent: "No relevant documents queried for objection.",
    found: "Relevant Legal Basis from Documents",
    failed: "Error querying documents for objection basis.",
};

pub struct Prosecutor {
    core: AgentCore,
}

impl Prosecutor {
    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    /// Build the prosecution's argument for the current round.
    pub async fn process_context(
        &self,
        case_context: &str,
        interaction_history: &str,
        retrieval: Option<&dyn RetrievalPort>,
    ) -> String {
        let query_fields = self
            .core
            .base_fields()
            .with("case_context", case_context)
            .with("recent_history", recent_history(interaction_history));
        let document_context = self
            .core
            .consult_documents(
                retrieval,
                TemplateId::ProsecutorArgumentQuery,
                &query_fields,
                ARGUMENT_DOCS,
            )
            .await;

        let fields = query_fields
            .with("interaction_history", interaction_history)
            .with("document_context", document_context);
        self.core
            .speak_or_placeholder(TemplateId::ProsecutorArgument, &fields)
            .await
    }

    /// Object to a defense statement.
    ///
    /// Returns `None` when the model declines to object or the call fails:
    /// a failed objection is treated as no objection at all.
    pub async fn object_to_defense(
        &self,
        defense_statement: &str,
        interaction_history: &str,
        retrieval: Option<&dyn RetrievalPort>,
    ) -> Option<String> {
        let query_fields = self
            .core
            .base_fields()
            .with("defense_statement", defense_statement)
            .with("recent_history", recent_history(interaction_history));
        let document_context = self
            .core
            .consult_documents(
                retrieval,
                TemplateId::ProsecutorObjectionQuery,
                &query_fields,
                OBJECTION_DOCS,
            )
            .await;

        let fields = query_fields
            .with("interaction_history", interaction_history)
            .with("document_context", document_context);

        match self.core.speak(TemplateId::ProsecutorObjection, &fields).await {
            Ok(reply) if is_pass_reply(&reply, NO_OBJECTION_MARKER) => {
                debug!("Prosecutor raised no objection");
                None
            }
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("Objection generation failed, continuing without objection: {}", e);
                None
            }
        }
    }

    /// Prepare cross-examination questions for a testimony.
    pub async fn cross_examine(&self, testimony: &str, interaction_history: &str) -> String {
        let fields = self
            .core
            .base_fields()
            .with("testimony", testimony)
            .with("interaction_history", interaction_history);
        self.core
            .speak_or_placeholder(TemplateId::ProsecutorCrossExamination, &fields)
            .await
    }
}
