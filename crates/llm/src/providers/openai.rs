//! OpenAI-compatible chat-completion provider.
//!
//! Works against any endpoint speaking the `/chat/completions` wire format
//! (OpenAI itself, AI Pipe, OpenRouter, local gateways).

use crate::client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tutor_core::{AppError, AppResult};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Wire request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Wire response body.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<LlmUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible client.
pub struct OpenAiClient {
    /// Provider label reported by `provider_name`
    name: String,

    /// Base URL, without trailing slash
    base_url: String,

    /// Bearer token
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client for the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a client for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: "openai".to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Apply a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> AppResult<Self> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Override the reported provider name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Convert the wire response into an `LlmResponse`.
    fn convert_response(
        &self,
        request: &LlmRequest,
        response: ChatCompletionResponse,
    ) -> AppResult<LlmResponse> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Llm("Completion response contained no message".to_string()))?;

        Ok(LlmResponse {
            content,
            model: response.model.unwrap_or_else(|| request.model.clone()),
            usage: response.usage.unwrap_or_default(),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!(provider = %self.name, model = %request.model, "Sending chat completion request");
        tracing::debug!("Request: {:?}", request);

        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to send request to {}: {}", self.name, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "{} API error ({}): {}",
                self.name, status, error_text
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Failed to parse completion response: {}", e)))?;

        let converted = self.convert_response(request, parsed)?;
        tracing::info!(
            total_tokens = converted.usage.total_tokens,
            "Received chat completion"
        );

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = OpenAiClient::with_base_url("https://aipipe.org/openrouter/v1/", "key");
        assert_eq!(
            client.endpoint(),
            "https://aipipe.org/openrouter/v1/chat/completions"
        );
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_request_body_shape() {
        let request = LlmRequest::new("question", "gpt-4o-mini").with_system("be brief");
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "question");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_convert_response_takes_first_choice() {
        let client = OpenAiClient::new("key");
        let request = LlmRequest::new("q", "gpt-4o-mini");
        let wire: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "model": "gpt-4o-mini-2024",
            "choices": [
                {"message": {"role": "assistant", "content": "  Use a list.  "}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }))
        .unwrap();

        let response = client.convert_response(&request, wire).unwrap();
        assert_eq!(response.content, "  Use a list.  ");
        assert_eq!(response.model, "gpt-4o-mini-2024");
        assert_eq!(response.usage.total_tokens, 14);
    }

    #[test]
    fn test_convert_response_without_choices_is_error() {
        let client = OpenAiClient::new("key");
        let request = LlmRequest::new("q", "gpt-4o-mini");
        let wire: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();

        let err = client.convert_response(&request, wire).unwrap_err();
        assert!(err.to_string().contains("no message"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_llm_error() {
        let client = OpenAiClient::with_base_url("http://127.0.0.1:1", "key");
        let result = client.complete(&LlmRequest::new("q", "m")).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
