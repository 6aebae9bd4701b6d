//! Anthropic Messages API adapter (§4.4).

use async_trait::async_trait;
use prospecting_core::ports::ModelAdapter;
use prospecting_domain::{AiModel, ProspectingError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const MODEL_ID: &str = "claude-haiku-4-5-20251001";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 800;

pub struct AnthropicAdapter {
    http: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl AnthropicAdapter {
    pub fn new(http: HttpClient, api_key: Option<String>) -> Self {
        Self { http, api_key, api_url: API_URL.to_string() }
    }

    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessageIn>,
}

#[derive(Debug, Serialize)]
struct MessageIn {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ModelAdapter for AnthropicAdapter {
    fn model(&self) -> AiModel {
        AiModel::Anthropic
    }

    fn is_active(&self) -> bool {
        self.api_key.is_some()
    }

    async fn ask(&self, query: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| ProspectingError::AuthFailed)?;

        let payload = MessagesRequest {
            model: MODEL_ID.to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![MessageIn { role: "user".to_string(), content: query.to_string() }],
        };

        let request = self
            .http
            .request(Method::POST, &self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload);

        let response = self.http.send(request).await?;
        let status = response.status();
        debug!(%status, model = "anthropic", "received response");

        if !status.is_success() {
            return Err(ProspectingError::from(InfraError::from(
                response.error_for_status().unwrap_err(),
            )));
        }

        let parsed: MessagesResponse =
            response.json().await.map_err(|e| ProspectingError::from(InfraError::from(e)))?;

        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| {
                ProspectingError::Internal("anthropic response contained no text block".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_http() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).max_attempts(1).build().unwrap()
    }

    #[tokio::test]
    async fn asks_and_extracts_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{ "type": "text", "text": "Oui, connu localement." }]
            })))
            .mount(&server)
            .await;

        let adapter = AnthropicAdapter::new(test_http(), Some("test-key".to_string()))
            .with_api_url(server.uri());

        let answer = adapter.ask("Qui est le meilleur électricien ?").await.unwrap();
        assert_eq!(answer, "Oui, connu localement.");
    }

    #[test]
    fn inactive_without_api_key() {
        let adapter = AnthropicAdapter::new(test_http(), None);
        assert!(!adapter.is_active());
    }
}
