//! Text generation port
//!
//! Defines the interface for the language-model backend every role agent
//! and the evaluation scorer talk to.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during text generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("No generation backend configured")]
    NotConfigured,
}

/// Sampling limits for one generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// Gateway to a text generation backend: prompt in, text out.
///
/// Implementations (adapters) live in the infrastructure layer. Callers
/// must treat failures as recoverable and never abort a trial on them.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError>;

    /// Backend identifier for logs.
    fn model_name(&self) -> &str;
}

/// Generator used when no backend is configured: every call fails with
/// [`GenerationError::NotConfigured`], so agents fall back to placeholders.
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: GenerationParams,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }

    fn model_name(&self) -> &str {
        "unconfigured"
    }
}
