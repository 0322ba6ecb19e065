use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;

/// Placeholder key shipped in sample env files; never sent upstream.
pub const PLACEHOLDER_KEY: &str = "mock-key";
const GEMINI_KEY_PREFIX: &str = "AIza";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("AI provider is not configured")]
    NotConfigured,
    #[error("AI provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("AI provider returned no candidates")]
    EmptyResponse,
    #[error("AI provider response is malformed: {0}")]
    Malformed(String),
}

/// Sampling parameters sent with each completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    pub const QUESTIONS: GenerationSettings = GenerationSettings {
        temperature: 0.7,
        max_output_tokens: 2000,
    };

    pub const FEEDBACK: GenerationSettings = GenerationSettings {
        temperature: 0.8,
        max_output_tokens: 600,
    };
}

/// Text-completion backend used by the gateway.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// False when calls are guaranteed to fail (no usable key).
    fn is_configured(&self) -> bool;

    async fn complete(
        &self,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// Google Gemini `generateContent` client. The key travels as the `key`
/// query parameter.
pub struct GeminiProvider {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &AiConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone().filter(|k| key_is_usable(k)),
            base_url: config.base_url.clone(),
        })
    }
}

pub fn key_is_usable(key: &str) -> bool {
    key != PLACEHOLDER_KEY && key.starts_with(GEMINI_KEY_PREFIX)
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: settings.temperature,
                max_output_tokens: settings.max_output_tokens,
            },
        };

        tracing::debug!(
            "Sending prompt to AI provider ({} chars, max {} tokens)",
            prompt.len(),
            settings.max_output_tokens
        );

        let response = self
            .http
            .post(&self.base_url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
            .ok_or(ProviderError::EmptyResponse)
    }
}
