//! Trial configuration from TOML (`[trial]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTrialConfig {
    /// Round limit shown in the trial status
    pub max_rounds: u32,
    /// Character limit quoted to every role prompt
    pub max_response_length: usize,
    /// Where finished trials are saved
    pub transcripts_dir: String,
}

impl Default for FileTrialConfig {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_response_length: 500,
            transcripts_dir: "transcripts".to_string(),
        }
    }
}
