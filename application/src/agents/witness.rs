//! Witness agent: answers questions strictly from its recorded testimony.

use super::base::AgentCore;
use courtroom_domain::{ExaminationMode, TemplateId, WitnessRecord};

const DIRECT_DEMEANOR: &str = "During direct examination, be clear and cooperative";
const CROSS_DEMEANOR: &str =
    "During cross-examination, be firm and precise in your answers. Answer only what was asked, no more.";
const CROSS_BREVITY: &str =
    "For cross-examination, keep your answers brief and to the point. Do not volunteer additional information.";

pub struct Witness {
    core: AgentCore,
    record: WitnessRecord,
}

impl Witness {
    pub fn new(core: AgentCore, record: WitnessRecord) -> Self {
        Self { core, record }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// The stored statement; no generation involved.
    pub fn provide_testimony(&self) -> String {
        format!("{}'s testimony: {}", self.record.name, self.record.testimony)
    }

    /// Answer a question, prefixed with the witness's name.
    ///
    /// Cross-examination adds the firmer demeanor and brevity rules.
    pub async fn answer_question(&self, question: &str, mode: ExaminationMode) -> String {
        let (demeanor, brevity) = match mode {
            ExaminationMode::Direct => (DIRECT_DEMEANOR, ""),
            ExaminationMode::Cross => (CROSS_DEMEANOR, CROSS_BREVITY),
        };

        let fields = self
            .core
            .base_fields()
            .with("testimony", clean_testimony(&self.record.testimony))
            .with("examination", mode.participle())
            .with("question", question)
            .with("demeanor_rule", demeanor)
            .with("brevity_rule", brevity);

        let answer = self
            .core
            .speak_or_placeholder(TemplateId::WitnessAnswer, &fields)
            .await;
        format!("{}: {}", self.record.name, answer)
    }
}

/// Strip a `Testimony:"..."` wrapper some callers put around statements.
fn clean_testimony(testimony: &str) -> &str {
    testimony
        .strip_prefix("Testimony:\"")
        .map(|rest| rest.strip_suffix('"').unwrap_or(rest))
        .unwrap_or(testimony)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generation::{GenerationError, GenerationParams};
    use crate::test_support::ScriptedGenerator;
    use courtroom_domain::{PromptTemplates, RoleProfile};
    use std::sync::Arc;

    fn alice(generator: Arc<ScriptedGenerator>, testimony: &str) -> Witness {
        let core = AgentCore::new(
            RoleProfile::witness("Alice"),
            generator,
            Arc::new(PromptTemplates::default()),
            GenerationParams::default(),
            500,
        );
        Witness::new(core, WitnessRecord::new("Alice", testimony))
    }

    #[test]
    fn testimony_is_returned_without_generation() {
        let generator = Arc::new(ScriptedGenerator::constant("unused"));
        let witness = alice(generator.clone(), "I saw the defendant at 9pm");

        assert_eq!(
            witness.provide_testimony(),
            "Alice's testimony: I saw the defendant at 9pm"
        );
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn direct_answer_is_cooperative_and_prefixed() {
        let generator = Arc::new(ScriptedGenerator::constant(" Around 9pm. "));
        let witness = alice(generator.clone(), "I saw the defendant at 9pm");

        let answer = witness
            .answer_question("When did you see him?", ExaminationMode::Direct)
            .await;

        assert_eq!(answer, "Alice: Around 9pm.");
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("You are being examined with the following question:"));
        assert!(prompt.contains(DIRECT_DEMEANOR));
        assert!(!prompt.contains(CROSS_BREVITY));
    }

    #[tokio::test]
    async fn cross_mode_is_explicit_not_inferred_from_text() {
        let generator = Arc::new(ScriptedGenerator::constant("Yes."));
        let witness = alice(generator.clone(), "I saw the defendant at 9pm");

        witness
            .answer_question("Did you cross the street?", ExaminationMode::Direct)
            .await;
        assert!(generator.last_prompt().unwrap().contains("being examined"));

        witness
            .answer_question("Were you there?", ExaminationMode::Cross)
            .await;
        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("being cross-examined"));
        assert!(prompt.contains(CROSS_DEMEANOR));
        assert!(prompt.contains(CROSS_BREVITY));
    }

    #[tokio::test]
    async fn failed_answer_still_names_witness() {
        let generator = Arc::new(ScriptedGenerator::failing(GenerationError::Timeout));
        let answer = alice(generator, "statement")
            .answer_question("Where?", ExaminationMode::Direct)
            .await;
        assert_eq!(answer, "Alice: [Alice is unable to respond: Timeout]");
    }

    #[test]
    fn testimony_wrapper_is_stripped() {
        assert_eq!(clean_testimony("Testimony:\"I saw it\""), "I saw it");
        assert_eq!(clean_testimony("Testimony:\"unterminated"), "unterminated");
        assert_eq!(clean_testimony("plain statement"), "plain statement");
    }
}
