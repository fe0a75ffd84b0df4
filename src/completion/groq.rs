use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::completion::{ChatMessage, CompletionGateway, COMPLETION_MODEL, MAX_OUTPUT_TOKENS};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible chat completions API (Groq by default).
pub struct GroqGateway {
    api_key: String,
    base_url: String,
    client: Client,
}

impl GroqGateway {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(api_key, base_url, client))
    }

    pub fn with_client(api_key: String, base_url: String, client: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request<'a>(&self, messages: &'a [ChatMessage]) -> CompletionRequest<'a> {
        CompletionRequest {
            model: COMPLETION_MODEL,
            messages,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[async_trait]
impl CompletionGateway for GroqGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let request = self.build_request(messages);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Completion API error ({}): {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Malformed completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Gateway("Completion response had no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> GroqGateway {
        GroqGateway::new(
            "test-key".to_string(),
            "https://api.groq.com/openai/v1/".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        assert_eq!(
            gateway().endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let messages = vec![ChatMessage::user("Write a brief summary")];
        let gateway = gateway();
        let body = serde_json::to_value(gateway.build_request(&messages)).unwrap();

        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Write a brief summary");
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"A desert planet."},"finish_reason":"stop"}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "A desert planet.");
    }
}
