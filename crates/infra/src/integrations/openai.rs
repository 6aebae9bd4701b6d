//! OpenAI Chat Completions adapter (§4.4).

use async_trait::async_trait;
use prospecting_core::ports::ModelAdapter;
use prospecting_domain::{AiModel, ProspectingError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL_ID: &str = "gpt-4o-mini";
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 800;

pub struct OpenAiAdapter {
    http: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl OpenAiAdapter {
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
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl ModelAdapter for OpenAiAdapter {
    fn model(&self) -> AiModel {
        AiModel::OpenAi
    }

    fn is_active(&self) -> bool {
        self.api_key.is_some()
    }

    async fn ask(&self, query: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProspectingError::AuthFailed)?;

        let payload = ChatRequest {
            model: MODEL_ID.to_string(),
            messages: vec![ChatMessage { role: "user".to_string(), content: query.to_string() }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let request = self
            .http
            .request(Method::POST, &self.api_url)
            .bearer_auth(api_key)
            .json(&payload);

        let response = self.http.send(request).await?;
        let status = response.status();
        debug!(%status, model = "openai", "received response");

        if !status.is_success() {
            return Err(ProspectingError::from(InfraError::from(
                response.error_for_status().unwrap_err(),
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProspectingError::from(InfraError::from(e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProspectingError::Internal("openai response contained no choices".into()))
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
    async fn asks_and_extracts_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "Oui, je connais cette entreprise." } }]
            })))
            .mount(&server)
            .await;

        let adapter = OpenAiAdapter::new(test_http(), Some("test-key".to_string()))
            .with_api_url(server.uri());

        let answer = adapter.ask("Connais-tu Plomberie Dupont ?").await.unwrap();
        assert!(answer.contains("Plomberie") || answer.contains("connais"));
    }

    #[test]
    fn inactive_without_api_key() {
        let adapter = OpenAiAdapter::new(test_http(), None);
        assert!(!adapter.is_active());
    }
}
