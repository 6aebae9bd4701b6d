//! Google Gemini `generateContent` adapter (§4.4).

use async_trait::async_trait;
use prospecting_core::ports::ModelAdapter;
use prospecting_domain::{AiModel, ProspectingError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

const MODEL_ID: &str = "gemini-1.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.1;

fn default_api_url() -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{MODEL_ID}:generateContent")
}

pub struct GeminiAdapter {
    http: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl GeminiAdapter {
    pub fn new(http: HttpClient, api_key: Option<String>) -> Self {
        Self { http, api_key, api_url: default_api_url() }
    }

    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl ModelAdapter for GeminiAdapter {
    fn model(&self) -> AiModel {
        AiModel::Gemini
    }

    fn is_active(&self) -> bool {
        self.api_key.is_some()
    }

    async fn ask(&self, query: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| ProspectingError::AuthFailed)?;

        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: query.to_string() }] }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let request = self
            .http
            .request(Method::POST, &self.api_url)
            .query(&[("key", api_key.as_str())])
            .json(&payload);

        let response = self.http.send(request).await?;
        let status = response.status();
        debug!(%status, model = "gemini", "received response");

        if !status.is_success() {
            return Err(ProspectingError::from(InfraError::from(
                response.error_for_status().unwrap_err(),
            )));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| ProspectingError::from(InfraError::from(e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                ProspectingError::Internal("gemini response contained no candidates".into())
            })
    }
}
