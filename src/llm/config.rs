//! Analysis client configuration.

use serde::{Deserialize, Serialize};

use super::prompts::DEFAULT_ANALYSIS_PROMPT;

/// Configuration for the analysis client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether document analysis is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// API endpoint of an OpenAI-compatible service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key, if the service requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model to use for analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Custom analysis prompt
    #[serde(default)]
    pub analysis_prompt: Option<String>,
    /// Maximum characters of document content to send to the service
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_content_chars() -> usize {
    4000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides (used internally to avoid recursion).
    fn base_default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            analysis_prompt: None,
            max_content_chars: default_max_content_chars(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LLM_ENABLED`: "true" or "false"
    /// - `LLM_ENDPOINT`: API endpoint
    /// - `LLM_API_KEY`: API key (falls back to `OPENAI_API_KEY`)
    /// - `LLM_MODEL`: Model name
    /// - `LLM_MAX_TOKENS`: Maximum tokens in response
    /// - `LLM_TEMPERATURE`: Generation temperature (0.0-1.0)
    /// - `LLM_MAX_CONTENT_CHARS`: Max document chars to send
    /// - `LLM_ANALYSIS_PROMPT`: Custom analysis prompt
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }
        if let Ok(val) = std::env::var("LLM_ENDPOINT") {
            self.endpoint = val;
        }
        if let Ok(val) = std::env::var("LLM_API_KEY") {
            self.api_key = Some(val);
        } else if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LLM_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LLM_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_content_chars = n;
            }
        }
        if let Ok(val) = std::env::var("LLM_ANALYSIS_PROMPT") {
            self.analysis_prompt = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Get the analysis prompt, using custom or default.
    pub fn get_analysis_prompt(&self) -> &str {
        self.analysis_prompt
            .as_deref()
            .unwrap_or(DEFAULT_ANALYSIS_PROMPT)
    }
}
