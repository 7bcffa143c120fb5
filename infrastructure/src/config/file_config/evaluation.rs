//! User evaluation from TOML (`[evaluation]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvaluationConfig {
    /// Score the case description and defense statements
    pub enabled: bool,
    pub max_tokens: u32,
    /// Kept low so scores are near-deterministic
    pub temperature: f32,
}

impl Default for FileEvaluationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_tokens: 300,
            temperature: 0.3,
        }
    }
}
