use super::{LlmClient, LlmSettings, ReviewError, Verdict};
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the `/api/generate` endpoint of a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let url = format!("{}/api/generate", settings.base_url());
        let mut builder =
            Client::builder().user_agent(concat!("llm-lint/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build Ollama HTTP client")?;
        Ok(Self {
            http,
            url,
            model: settings.model.clone(),
        })
    }

    #[cfg(test)]
    fn url(&self) -> &str {
        &self.url
    }

    #[cfg(test)]
    fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn review(&self, filename: &str, content: &str) -> Result<Verdict, ReviewError> {
        let payload = GenerateRequest::new(&self.model, filename, content);
        debug!(file = filename, model = %self.model, url = %self.url, "requesting review");

        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(ReviewError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::Status { status, body });
        }

        let body = response.bytes().await.map_err(ReviewError::Body)?;
        decode_verdict(&body)
    }
}

/// Decode the outer envelope, then the verdict JSON carried in its `response` string.
///
/// A reply without a `response` field fails at the envelope step rather than
/// being treated as an empty verdict string, so server-side errors such as
/// `{"error": "..."}` are attributed to the envelope.
pub(crate) fn decode_verdict(body: &[u8]) -> Result<Verdict, ReviewError> {
    let envelope: GenerateResponse =
        serde_json::from_slice(body).map_err(ReviewError::Envelope)?;
    serde_json::from_str(&envelope.response).map_err(ReviewError::Verdict)
}

/// Body of a non-streaming generate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub format: &'static str,
    pub system: &'static str,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: &str, filename: &str, content: &str) -> Self {
        Self {
            model: model.to_string(),
            prompt: user_prompt(filename, content),
            format: "json",
            system: SYSTEM_PROMPT,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}
