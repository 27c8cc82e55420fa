//! Minimal OpenAI-compatible chat completion client.

use crate::config::TrackerConfig;
use crate::domain::model::CompletionRequest;
use crate::domain::ports::CompletionClient;
use crate::utils::error::{Result, TrackerError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(request.system_prompt.clone()),
                Message::user(request.user_prompt.clone()),
            ],
            temperature: Some(request.temperature),
        }
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let start = std::time::Instant::now();
        let body = self.chat_request(request);

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("OpenAI request failed: {}", e);
                TrackerError::CompletionError {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("OpenAI API error {}: {}", status, error_text);
            return Err(TrackerError::CompletionError {
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        let chat_response: ChatResponseRaw =
            response
                .json()
                .await
                .map_err(|e| TrackerError::CompletionError {
                    message: format!("Unexpected response body: {}", e),
                })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| TrackerError::CompletionError {
                message: "No choices in response".to_string(),
            })?;

        tracing::debug!(
            "OpenAI chat completion ({}) took {} ms",
            self.model,
            start.elapsed().as_millis()
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use httpmock::prelude::*;

    fn config_for(base_url: &str) -> TrackerConfig {
        let file = TomlConfig::from_toml_str(&format!(
            r#"
[openai]
api_key = "sk-test"
base_url = "{}"
model = "gpt-3.5-turbo"

[notion]
api_key = "secret_test"
database_id = "db-test"
"#,
            base_url
        ))
        .unwrap();
        TrackerConfig::resolve(file, |_| None).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "You extract things.".to_string(),
            user_prompt: "Job posting text".to_string(),
            temperature: 0.1,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body_partial(
                    r#"{
                        "model": "gpt-3.5-turbo",
                        "messages": [
                            {"role": "system", "content": "You extract things."},
                            {"role": "user", "content": "Job posting text"}
                        ]
                    }"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "{\"company\": \"Acme\"}"}}
                    ]
                }));
        });

        let client = OpenAiClient::new(&config_for(&server.url("/v1")));
        let content = client.complete(&request()).await.unwrap();

        api_mock.assert();
        assert_eq!(content, "{\"company\": \"Acme\"}");
    }

    #[test]
    fn test_chat_request_carries_temperature() {
        let client = OpenAiClient::new(&config_for("https://api.openai.com/v1/"));
        let body = serde_json::to_value(client.chat_request(&request())).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401)
                .json_body(serde_json::json!({"error": {"message": "Incorrect API key"}}));
        });

        let client = OpenAiClient::new(&config_for(&server.url("/v1")));
        let err = client.complete(&request()).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, TrackerError::CompletionError { .. }));
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[tokio::test]
    async fn test_complete_without_choices() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .json_body(serde_json::json!({"choices": []}));
        });

        let client = OpenAiClient::new(&config_for(&server.url("/v1")));
        let result = client.complete(&request()).await;

        assert!(matches!(result, Err(TrackerError::CompletionError { .. })));
    }
}
