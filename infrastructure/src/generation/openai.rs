//! OpenAI-compatible chat completions adapter
//!
//! Implements [`TextGenerator`] by sending each prompt as a single user
//! message to `{base_url}/chat/completions`.

use super::types::{ApiError, CompletionRequest, CompletionResponse, Message};
use async_trait::async_trait;
use courtroom_application::ports::text_generation::{
    GenerationError, GenerationParams, TextGenerator,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![Message::user(prompt)],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        debug!(model = %self.model, prompt_bytes = prompt.len(), "Sending completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, &body));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        first_choice_text(completion)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for OpenAiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn map_transport_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else if error.is_connect() {
        GenerationError::Connection(error.to_string())
    } else {
        GenerationError::RequestFailed(error.to_string())
    }
}

fn map_status(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => GenerationError::Quota(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GenerationError::Timeout,
        _ => GenerationError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), message)),
    }
}

fn first_choice_text(response: CompletionResponse) -> Result<String, GenerationError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GenerationError::InvalidResponse("No completion in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![Message::user("Provide opening instructions.")],
            max_tokens: 300,
            temperature: 0.3,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Provide opening instructions.");
        assert_eq!(value["max_tokens"], 300);
    }

    #[test]
    fn test_first_choice_text() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Court is in session."},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(response).unwrap(), "Court is in session.");

        let empty: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice_text(empty),
            Err(GenerationError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_invalid() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert!(first_choice_text(response).is_err());
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error":{"message":"Rate limit reached"}}"#;
        assert_eq!(
            map_status(StatusCode::TOO_MANY_REQUESTS, body),
            GenerationError::Quota("Rate limit reached".to_string())
        );
        assert_eq!(
            map_status(StatusCode::GATEWAY_TIMEOUT, ""),
            GenerationError::Timeout
        );
        assert_eq!(
            map_status(StatusCode::UNAUTHORIZED, "bad key"),
            GenerationError::RequestFailed("HTTP 401: bad key".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let generator =
            OpenAiGenerator::new("sk-secret", "https://api.openai.com/v1/", "gpt-4o-mini", None)
                .unwrap();
        let debug = format!("{:?}", generator);
        assert!(!debug.contains("sk-secret"));
        assert_eq!(generator.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(generator.model_name(), "gpt-4o-mini");
    }
}
