//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application settings.

mod evaluation;
mod logging;
mod model;
mod retrieval;
mod trial;

pub use evaluation::FileEvaluationConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use retrieval::FileRetrievalConfig;
pub use trial::FileTrialConfig;

use courtroom_application::{GenerationParams, TrialSettings};
use courtroom_domain::{PromptTemplates, TemplateId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("trial.max_rounds must be at least 1")]
    ZeroMaxRounds,

    #[error("{field} must be between 0.0 and 2.0 (got {value})")]
    TemperatureOutOfRange { field: &'static str, value: f32 },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Generation backend
    pub model: FileModelConfig,
    /// Trial flow and persistence
    pub trial: FileTrialConfig,
    /// Legal document grounding
    pub retrieval: FileRetrievalConfig,
    /// Scoring of user submissions
    pub evaluation: FileEvaluationConfig,
    /// Structured conversation log
    pub logging: FileLoggingConfig,
    /// Prompt template overrides keyed by template id
    pub prompts: HashMap<TemplateId, String>,
}

impl FileConfig {
    /// Check values that would otherwise fail at request time.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.model.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.model.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.trial.max_rounds == 0 {
            return Err(ConfigValidationError::ZeroMaxRounds);
        }
        check_temperature("model.temperature", self.model.temperature)?;
        check_temperature("evaluation.temperature", self.evaluation.temperature)?;
        Ok(())
    }

    pub fn trial_settings(&self) -> TrialSettings {
        TrialSettings::default()
            .with_max_rounds(self.trial.max_rounds)
            .with_max_response_length(self.trial.max_response_length)
            .with_generation(GenerationParams::new(
                self.model.max_tokens,
                self.model.temperature,
            ))
            .with_evaluation(GenerationParams::new(
                self.evaluation.max_tokens,
                self.evaluation.temperature,
            ))
    }

    /// Built-in templates with the configured overrides applied.
    pub fn prompt_templates(&self) -> PromptTemplates {
        PromptTemplates::with_overrides(self.prompts.clone())
    }
}

fn check_temperature(field: &'static str, value: f32) -> Result<(), ConfigValidationError> {
    if (0.0..=2.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigValidationError::TemperatureOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[model]
name = "gpt-4o"
base_url = "http://localhost:8080/v1"
temperature = 0.5
timeout_seconds = 30

[trial]
max_rounds = 3
transcripts_dir = "out"

[retrieval]
enabled = false

[evaluation]
max_tokens = 200

[logging]
conversation_log = "trial.jsonl"

[prompts]
judge_instructions = "Give {phase} instructions."
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.name, "gpt-4o");
        assert_eq!(config.model.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model.timeout_seconds, Some(30));
        assert_eq!(config.trial.max_rounds, 3);
        assert_eq!(config.trial.transcripts_dir, "out");
        assert!(!config.retrieval.enabled);
        assert_eq!(config.evaluation.max_tokens, 200);
        assert_eq!(config.logging.conversation_log.as_deref(), Some("trial.jsonl"));
        assert_eq!(
            config.prompt_templates().text(TemplateId::JudgeInstructions),
            "Give {phase} instructions."
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[trial]
max_response_length = 300
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.trial.max_response_length, 300);
        // Defaults should apply
        assert_eq!(config.trial.max_rounds, 5);
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.retrieval.documents_dir, "legal_docs");
        assert!(config.evaluation.enabled);
    }

    #[test]
    fn test_trial_settings_conversion() {
        let mut config = FileConfig::default();
        config.trial.max_rounds = 7;
        config.model.max_tokens = 1000;

        let settings = config.trial_settings();
        assert_eq!(settings.max_rounds, 7);
        assert_eq!(settings.max_response_length, 500);
        assert_eq!(settings.generation, GenerationParams::new(1000, 0.7));
        assert_eq!(settings.evaluation, GenerationParams::new(300, 0.3));
    }

    #[test]
    fn test_validate_valid_config() {
        assert_eq!(FileConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.model.timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.model.name = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));

        let mut config = FileConfig::default();
        config.trial.max_rounds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroMaxRounds));

        let mut config = FileConfig::default();
        config.evaluation.temperature = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::TemperatureOutOfRange {
                field: "evaluation.temperature",
                ..
            })
        ));
    }

    #[test]
    fn test_direct_api_key_wins_over_environment() {
        let mut model = FileModelConfig::default();
        model.api_key = Some("sk-from-file".to_string());
        model.api_key_env = "COURTROOM_TEST_UNSET_KEY_VAR".to_string();
        assert_eq!(model.resolve_api_key().as_deref(), Some("sk-from-file"));

        model.api_key = None;
        assert_eq!(model.resolve_api_key(), None);
    }
}
