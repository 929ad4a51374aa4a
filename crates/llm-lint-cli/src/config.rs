use std::path::Path;

use anyhow::{Context, Result};
use llm_lint_core::{FileFilter, LlmSettings};
use serde::Deserialize;

/// Optional on-disk configuration, layered between defaults and environment.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct LlmSection {
    pub model: Option<String>,
    pub port: Option<u16>,
    pub endpoint: Option<String>,
    pub server_binary: Option<String>,
    /// Human-readable duration such as `90s` or `2m`.
    pub timeout: Option<String>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct LimitsSection {
    pub extension: Option<String>,
    pub max_chars: Option<usize>,
    pub max_files: Option<usize>,
}

/// Read the config file when one was given; the format follows its extension.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path))
        .build()
        .with_context(|| format!("failed to load config file {}", path.display()))?;
    settings
        .try_deserialize()
        .with_context(|| format!("invalid config file {}", path.display()))
}

impl FileConfig {
    pub fn apply(&self, mut settings: LlmSettings) -> Result<LlmSettings> {
        let llm = &self.llm;
        if let Some(model) = &llm.model {
            settings.model = model.clone();
        }
        if let Some(port) = llm.port {
            settings.port = port;
        }
        if let Some(endpoint) = &llm.endpoint {
            settings.endpoint = Some(endpoint.clone());
        }
        if let Some(binary) = &llm.server_binary {
            settings.server_binary = binary.clone();
        }
        if let Some(timeout) = &llm.timeout {
            let parsed = humantime::parse_duration(timeout)
                .with_context(|| format!("invalid llm.timeout `{timeout}`"))?;
            settings.timeout = Some(parsed);
        }
        Ok(settings)
    }

    pub fn filter(&self) -> FileFilter {
        let defaults = FileFilter::default();
        let limits = &self.limits;
        FileFilter::new(
            limits
                .extension
                .clone()
                .unwrap_or_else(|| defaults.extension().to_string()),
            limits.max_chars.unwrap_or(defaults.max_chars()),
            limits.max_files.unwrap_or(defaults.max_files()),
        )
    }
}
