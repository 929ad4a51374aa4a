use anyhow::{Context, Result};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "qwen2.5-coder:7b";
pub const DEFAULT_PORT: u16 = 11435;
pub const DEFAULT_SERVER_BINARY: &str = "ollama";

/// Connection and launch settings for the local model server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub model: String,
    pub port: u16,
    /// Base URL override; requests go to `http://127.0.0.1:<port>` when unset.
    pub endpoint: Option<String>,
    pub server_binary: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub timeout: Option<Duration>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
            endpoint: None,
            server_binary: DEFAULT_SERVER_BINARY.to_string(),
            timeout: None,
        }
    }
}

impl LlmSettings {
    const MODEL_ENV: &'static str = "LLM_LINT_MODEL";
    const PORT_ENV: &'static str = "LLM_LINT_PORT";
    const ENDPOINT_ENV: &'static str = "LLM_LINT_ENDPOINT";
    const SERVER_BIN_ENV: &'static str = "LLM_LINT_SERVER_BIN";
    const TIMEOUT_ENV: &'static str = "LLM_LINT_TIMEOUT";

    /// Load settings from environment variables on top of the defaults.
    ///
    /// * `LLM_LINT_MODEL`      — Model identifier (default: `qwen2.5-coder:7b`).
    /// * `LLM_LINT_PORT`       — Port the server binds on 127.0.0.1 (default: `11435`).
    /// * `LLM_LINT_ENDPOINT`   — Optional base URL replacing the loopback address.
    /// * `LLM_LINT_SERVER_BIN` — Server executable (default: `ollama`).
    /// * `LLM_LINT_TIMEOUT`    — Optional request timeout, e.g. `90s` or `2m`.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Overlay environment variables onto already-resolved settings.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(std::env::vars().collect())
    }

    fn with_vars(mut self, vars: HashMap<String, String>) -> Result<Self> {
        let value = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(model) = value(Self::MODEL_ENV) {
            self.model = model;
        }
        if let Some(port) = value(Self::PORT_ENV) {
            self.port = port
                .parse()
                .with_context(|| format!("invalid port `{port}` in {}", Self::PORT_ENV))?;
        }
        if let Some(endpoint) = value(Self::ENDPOINT_ENV) {
            self.endpoint = Some(endpoint);
        }
        if let Some(binary) = value(Self::SERVER_BIN_ENV) {
            self.server_binary = binary;
        }
        if let Some(timeout) = value(Self::TIMEOUT_ENV) {
            let parsed = humantime::parse_duration(&timeout).with_context(|| {
                format!("invalid duration `{timeout}` in {}", Self::TIMEOUT_ENV)
            })?;
            self.timeout = Some(parsed);
        }
        Ok(self)
    }

    /// Address handed to the server through `OLLAMA_HOST`.
    pub fn server_host(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("http://{}", self.server_host()),
        }
    }
}
