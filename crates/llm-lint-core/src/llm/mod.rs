mod ollama;
mod settings;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ollama::{GenerateRequest, GenerateResponse, OllamaClient};
pub use settings::LlmSettings;

/// Client abstraction for asking a model to review a single source file.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Produce a verdict for `content`, identified to the model as `filename`.
    async fn review(&self, filename: &str, content: &str) -> Result<Verdict, ReviewError>;
}

/// Structured judgment returned by the model for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "follows_best_practices", default)]
    pub passes: bool,
    #[serde(default)]
    pub suggestions: String,
}

/// Failures while reviewing one file. None of them abort the hook.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("failed to call model server: {0}")]
    Request(#[source] reqwest::Error),
    #[error("model server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("failed to decode generate response: {0}")]
    Envelope(#[source] serde_json::Error),
    #[error("failed to decode verdict from model output: {0}")]
    Verdict(#[source] serde_json::Error),
}
