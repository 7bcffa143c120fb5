//! Generation backend configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model name sent with every request (default: "gpt-4o-mini")
    pub name: String,
    /// API base URL; any OpenAI-compatible server works
    pub base_url: String,
    /// Direct API key (prefer the environment variable)
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset
    pub api_key_env: String,
    /// Token limit for role statements
    pub max_tokens: u32,
    /// Sampling temperature for role statements
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            timeout_seconds: None,
        }
    }
}

impl FileModelConfig {
    /// The API key from the file, else from the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
