//! Analysis client for document classification and summarization.
//!
//! Talks to an OpenAI-compatible chat-completion endpoint. A malformed reply
//! never fails the pipeline: it degrades to [`DocumentAnalysis::fallback`].
//! Transport failure is a distinct, surfaced error.

mod config;
mod prompts;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::DocumentAnalysis;

pub use config::LlmConfig;
pub use prompts::DEFAULT_ANALYSIS_PROMPT;

/// Errors that can occur while calling the analysis service.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The service could not be reached or returned a non-success status.
    #[error("Analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Analysis is disabled by configuration.
    #[error("Analysis is disabled")]
    Disabled,
}

/// Client for the document analysis service.
pub struct AnalysisClient {
    config: LlmConfig,
    client: Client,
}

/// Chat-completion API request format.
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

/// Chat-completion API response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl AnalysisClient {
    /// Create a new analysis client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Check if the analysis service is available.
    pub async fn is_available(&self) -> bool {
        if !self.config.enabled {
            return false;
        }
        let url = format!("{}/v1/models", self.config.endpoint);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        match request.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Classify and summarize a document.
    ///
    /// The text is truncated to the configured maximum before sending. A
    /// reply that is not well-formed JSON yields the fallback record; only
    /// transport failure is an error, and the caller must not save the
    /// document in that case.
    pub async fn analyze(
        &self,
        title: &str,
        text: &str,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        if !self.config.enabled {
            return Err(AnalysisError::Disabled);
        }

        let truncated = self.truncate_content(text);
        debug!("Requesting analysis for: {}", title);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.config.get_analysis_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Document name: {}\n\nDocument text:\n{}", title, truncated),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.config.endpoint);
        let mut http_request = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let resp = http_request
            .send()
            .await
            .map_err(|e| AnalysisError::ServiceUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::ServiceUnavailable(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let reply: ChatResponse = match resp.json().await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Malformed analysis response envelope: {}", e);
                return Ok(DocumentAnalysis::fallback());
            }
        };

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(parse_analysis(&content))
    }

    /// Truncate content to configured maximum (UTF-8 safe).
    fn truncate_content<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.config.max_content_chars {
            return text;
        }
        // Find a valid UTF-8 boundary at or before max_content_chars
        let mut end = self.config.max_content_chars;
        while end > 0 && !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

/// Parse a reply's message content into a [`DocumentAnalysis`].
///
/// Strips a surrounding markdown code fence if the model added one despite
/// instructions. Anything that does not decode into the full required shape
/// yields the fixed fallback record.
pub fn parse_analysis(content: &str) -> DocumentAnalysis {
    let body = strip_code_fence(content);
    match serde_json::from_str(body) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Could not parse analysis reply, using fallback: {}", e);
            DocumentAnalysis::fallback()
        }
    }
}

/// Remove a wrapping ``` or ```json fence, if present.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.trim_end().strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}
