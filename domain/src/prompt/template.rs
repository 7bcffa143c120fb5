//! Prompt templates for every courtroom role
//!
//! Templates are plain text with `{field}` placeholders, keyed by
//! [`TemplateId`]. The built-in set can be overridden per id from
//! configuration, so wording changes never touch control flow.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Reply the prosecutor gives when a defense statement is unobjectionable.
pub const NO_OBJECTION_MARKER: &str = "NO OBJECTION";

/// Reply the judge gives when nothing requires the court's attention.
pub const NO_COMMENT_MARKER: &str = "NO COMMENT";

/// Identifies one prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// Identity header prepended to every role prompt
    RolePreamble,
    ProsecutorArgument,
    ProsecutorArgumentQuery,
    ProsecutorObjection,
    ProsecutorObjectionQuery,
    ProsecutorCrossExamination,
    JudgeProceedings,
    JudgeProceedingsQuery,
    JudgeRuling,
    JudgeRulingQuery,
    JudgeVerdict,
    JudgeInstructions,
    WitnessAnswer,
    EvaluateCaseDescription,
    EvaluateDefenseStatement,
}

impl TemplateId {
    pub const ALL: [TemplateId; 15] = [
        TemplateId::RolePreamble,
        TemplateId::ProsecutorArgument,
        TemplateId::ProsecutorArgumentQuery,
        TemplateId::ProsecutorObjection,
        TemplateId::ProsecutorObjectionQuery,
        TemplateId::ProsecutorCrossExamination,
        TemplateId::JudgeProceedings,
        TemplateId::JudgeProceedingsQuery,
        TemplateId::JudgeRuling,
        TemplateId::JudgeRulingQuery,
        TemplateId::JudgeVerdict,
        TemplateId::JudgeInstructions,
        TemplateId::WitnessAnswer,
        TemplateId::EvaluateCaseDescription,
        TemplateId::EvaluateDefenseStatement,
    ];

    /// Built-in template text.
    pub fn default_text(&self) -> &'static str {
        match self {
            TemplateId::RolePreamble => {
                r#"You are {name}, acting as {role}.
Your goal: {goal}
{persona}

"#
            }
            TemplateId::ProsecutorArgument => {
                r#"You are a skilled prosecutor in a courtroom trial. Your role is to:
1. Present arguments against the defendant
2. Question the defendant's statements
3. Build a case based on evidence and legal principles
4. Maintain a professional and assertive tone

Current case context: {case_context}

Previous interactions: {interaction_history}

Relevant information from documents: {document_context}

Your response should be concise and focused on legal arguments, potentially referencing the document info. Maximum length: {max_length} characters."#
            }
            TemplateId::ProsecutorArgumentQuery => {
                "Based on the case context '{case_context}', what is the relevance of the following interaction history: {recent_history}?"
            }
            TemplateId::ProsecutorObjection => {
                r#"Based on the following defense statement, context, and document information, generate a legal objection:

Defense Statement: {defense_statement}
Context: {interaction_history}
Document Info: {document_context}

Your objection should:
1. Be based on valid legal grounds mentioned in documents or standard procedure
2. Cite relevant rules if possible (from documents or general knowledge)
3. Be concise and clear

If there are no valid grounds to object, reply with exactly: NO OBJECTION

Maximum length: {max_length} characters."#
            }
            TemplateId::ProsecutorObjectionQuery => {
                "What are the legal grounds to object to the following defense statement, given the context? Statement: '{defense_statement}'. Context: {recent_history}"
            }
            TemplateId::ProsecutorCrossExamination => {
                r#"Based on the following testimony and context, prepare cross-examination questions:

Testimony: {testimony}
Context: {interaction_history}

Your questions should:
1. Focus on inconsistencies in the testimony
2. Challenge the credibility of the witness
3. Be specific and targeted
4. Follow proper courtroom procedure

Maximum length: {max_length} characters."#
            }
            TemplateId::JudgeProceedings => {
                r#"You are an experienced judge presiding over a courtroom trial. Your role is to:
1. Ensure proper courtroom procedure
2. Make decisions based SOLELY on what has been presented and heard in court
3. Ask clarifying questions when needed
4. Make rulings on objections based on the evidence and testimony presented
5. Maintain order and professionalism

Current case context: {case_context}

Previous interactions: {interaction_history}

Relevant information from documents: {document_context}

Your decisions and rulings must be based ONLY on:
1. The evidence and testimony presented in court
2. The legal arguments made by both sides
3. The applicable laws and procedures
4. The interaction history of the trial

Do not make assumptions or consider information not presented in court.
If nothing requires the court's attention, reply with exactly: NO COMMENT

Maximum length: {max_length} characters."#
            }
            TemplateId::JudgeProceedingsQuery => {
                "Are there specific procedural rules in the documents relevant to the current state of the trial? Context: {case_context}. History: {recent_history}"
            }
            TemplateId::JudgeRuling => {
                r#"Based on the following objection, context, and document information, make a ruling:

Objection: {objection}
Context: {interaction_history}
Document Info: {document_context}

Your ruling should:
1. Be clear and decisive (Sustained/Overruled)
2. Cite relevant legal basis (from documents or general knowledge)
3. Provide brief explanation if necessary

Maximum length: {max_length} characters."#
            }
            TemplateId::JudgeRulingQuery => {
                "Based on legal documents, what is the correct ruling (Sustained/Overruled) and reasoning for this objection: '{objection}'? Context: {recent_history}"
            }
            TemplateId::JudgeVerdict => {
                r#"Based on the following trial transcript, provide a detailed verdict that includes:
1. Summary of the case
2. Key arguments from both sides
3. Legal analysis
4. Final decision with reasoning
5. Any recommendations or next steps

Trial transcript: {transcript}

Your verdict should be thorough and well-reasoned. Maximum length: {max_length} characters."#
            }
            TemplateId::JudgeInstructions => {
                r#"Provide appropriate {phase} instructions for the court.

Instructions should be:
1. Clear and concise
2. Legally accurate
3. Appropriate for the current phase
4. In formal legal language

Maximum length: {max_length} characters."#
            }
            TemplateId::WitnessAnswer => {
                r#"You are a witness in a courtroom. You have provided the following testimony:

{testimony}

You are being {examination} with the following question:
{question}

Rules for your response:
1. Base your answer ONLY on the information in your testimony
2. If the question asks for opinions about guilt/innocence, politely decline to answer
3. If you don't have information in your testimony to answer the question, say so
4. Keep your answer concise and focused on the specific question asked
5. {demeanor_rule}
6. Do not make up information not in your testimony
7. If you need to refer to specific details, quote them from your testimony
8. {brevity_rule}

Provide your answer:"#
            }
            TemplateId::EvaluateCaseDescription => {
                r#"You are a legal expert evaluating the clarity, completeness, and legal relevance of the following case description:

---
{user_input}
---

Provide a score from 1 to 10 (1=poor, 10=excellent) for each criterion, followed by a brief justification (1-2 sentences):
- Persuasiveness (Sets up a compelling scenario?):
- Factual Grounding (Plausible and relevant details?):
- Coherence (Clear, logical, organized?):"#
            }
            TemplateId::EvaluateDefenseStatement => {
                r#"You are a legal expert evaluating the following defense statement within the context of the trial:

Defense Statement:
---
{user_input}
---

Trial History:
---
{interaction_history}
---

Provide a score from 1 to 10 (1=poor, 10=excellent) for each criterion, followed by a brief justification (1-2 sentences):
- Persuasiveness (Convincing and impactful as a defense?):
- Factual Grounding (Supported by context/potential evidence?):
- Coherence (Logical, clear, organized?):"#
            }
        }
    }
}

/// Named values substituted into a template.
#[derive(Debug, Clone, Default)]
pub struct PromptFields<'a> {
    values: Vec<(&'static str, Cow<'a, str>)>,
}

impl<'a> PromptFields<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a field.
    pub fn with(mut self, key: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }
}

/// The template set used by all agents of one trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplates {
    templates: HashMap<TemplateId, String>,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            templates: TemplateId::ALL
                .iter()
                .map(|id| (*id, id.default_text().to_string()))
                .collect(),
        }
    }
}

impl PromptTemplates {
    /// Built-in templates with the given ids replaced.
    pub fn with_overrides(overrides: HashMap<TemplateId, String>) -> Self {
        let mut templates = Self::default();
        templates.templates.extend(overrides);
        templates
    }

    /// Raw template text for an id.
    pub fn text(&self, id: TemplateId) -> &str {
        self.templates
            .get(&id)
            .map(String::as_str)
            .unwrap_or_else(|| id.default_text())
    }

    /// Render a template, substituting every `{field}` that has a value.
    ///
    /// Substitution is a single pass, so braces inside field values are
    /// never expanded. Placeholders without a value are left as written.
    pub fn render(&self, id: TemplateId, fields: &PromptFields<'_>) -> String {
        render_text(self.text(id), fields)
    }
}

fn render_text(template: &str, fields: &PromptFields<'_>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            let is_identifier =
                !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if is_identifier {
                fields.get(key).map(|value| (value, close))
            } else {
                None
            }
        });

        match replacement {
            Some((value, close)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// True when a reply is empty or is exactly the given pass marker
/// (case-insensitive, trailing punctuation ignored).
pub fn is_pass_reply(reply: &str, marker: &str) -> bool {
    let normalized = reply
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == '!')
        .trim();
    normalized.is_empty() || normalized.eq_ignore_ascii_case(marker)
}
