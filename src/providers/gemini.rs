//! Gemini provider implementation for Dhinchak
//!
//! This module implements the Provider trait against Google's
//! generative-language API. Each request carries exactly one user message
//! and the fixed generation configuration; no conversation history is sent.

use crate::config::GeminiConfig;
use crate::error::{DhinchakError, Result};
use crate::providers::{canned_reply, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini API provider
///
/// Connects to the hosted generative-language API to fetch replies.
/// Creator questions are answered locally via the canned-reply policy and
/// never reach the network. There is no retry and no backoff: a failed call
/// surfaces as a single `Fetch` error.
///
/// # Examples
///
/// ```no_run
/// use dhinchak::config::GeminiConfig;
/// use dhinchak::providers::{GeminiProvider, Provider};
///
/// # async fn example() -> dhinchak::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: "key".to_string(),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let reply = provider.fetch_reply("Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

/// A content block in Gemini wire format
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// A text part in Gemini wire format
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Generation parameters in Gemini wire format
#[derive(Debug, Serialize)]
struct WireGenerationConfig {
    temperature: f64,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

/// Response body from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A reply candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration containing key, base URL, model,
    ///   and generation parameters
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent("dhinchak/0.2.0")
            .build()
            .map_err(|e| DhinchakError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
            generation_config: WireGenerationConfig {
                temperature: self.config.generation.temperature,
                top_p: self.config.generation.top_p,
                max_output_tokens: self.config.generation.max_output_tokens,
                response_mime_type: "text/plain",
            },
        }
    }

    /// Pulls the reply text out of a response body
    ///
    /// The reply is the concatenation of the first candidate's parts.
    fn extract_reply(response: GenerateContentResponse) -> Result<String> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DhinchakError::Fetch("Response contained no candidates".to_string()))?;

        let content = candidate
            .content
            .ok_or_else(|| DhinchakError::Fetch("Candidate contained no content".to_string()))?;

        let reply: String = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");

        if reply.is_empty() {
            return Err(DhinchakError::Fetch("Candidate contained no text".to_string()).into());
        }

        Ok(reply)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn fetch_reply(&self, text: &str) -> Result<String> {
        // Creator questions short-circuit before any request is built
        if let Some(reply) = canned_reply(text) {
            tracing::debug!("Creator trigger matched, returning canned reply");
            return Ok(reply.to_string());
        }

        let url = self.endpoint();
        let request = self.build_request(text);

        tracing::debug!("Sending Gemini request: model={}", self.config.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                DhinchakError::Fetch(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(DhinchakError::Fetch(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            DhinchakError::Fetch(format!("Failed to parse Gemini response: {}", e))
        })?;

        Self::extract_reply(body)
    }
}
