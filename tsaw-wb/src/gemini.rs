//! Gemini generative-language API client
//!
//! One outbound call per invocation, no retries. Generation parameters
//! are pinned at low randomness with an output-length cap so repeated
//! requests for the same row stay close to deterministic.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tsaw_common::config::Config;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const TEMPERATURE: f32 = 0.2;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// The four standard harm categories; all are configured with the same
/// threshold from `Config`.
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini client errors
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
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

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
    /// Alternate flat shape some upstream revisions return
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

/// Decoded upstream reply, one variant per accepted response shape.
///
/// The fallback order is fixed: candidate parts, then the flat text
/// field, then a diagnostic carrying whatever finish/block reason the
/// upstream supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeminiReply {
    /// Text assembled from the first candidate's content parts
    Parts(String),
    /// Top-level single-string text field
    Flat(String),
    /// Upstream answered but produced no usable text
    Missing { reason: String },
}

impl GeminiReply {
    /// The recommendation text, if the reply carried any.
    pub fn text(&self) -> Option<&str> {
        match self {
            GeminiReply::Parts(text) | GeminiReply::Flat(text) => Some(text),
            GeminiReply::Missing { .. } => None,
        }
    }

    fn from_response(response: GenerateResponse) -> Self {
        if let Some(candidate) = response.candidates.first() {
            if let Some(content) = &candidate.content {
                let joined: String = content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect();
                if !joined.is_empty() {
                    return GeminiReply::Parts(joined);
                }
            }
        }

        if let Some(text) = response.text.as_deref() {
            if !text.is_empty() {
                return GeminiReply::Flat(text.to_string());
            }
        }

        let reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .or_else(|| {
                response
                    .prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.clone())
            })
            .unwrap_or_else(|| "unknown".to_string());

        GeminiReply::Missing { reason }
    }
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    safety_threshold: String,
}

impl GeminiClient {
    /// Build a client from configuration. Returns `None` when no
    /// credential is configured; the caller reports that condition
    /// instead of contacting the upstream.
    pub fn from_config(config: &Config) -> Result<Option<Self>, GeminiError> {
        let Some(api_key) = config.gemini_api_key.clone() else {
            return Ok(None);
        };

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        Ok(Some(Self {
            http_client,
            api_key,
            model: config.gemini_model.clone(),
            safety_threshold: config.safety_threshold.clone(),
        }))
    }

    /// Generate text from a single prompt.
    pub async fn generate(&self, prompt: &str) -> Result<GeminiReply, GeminiError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: self.safety_threshold.clone(),
                })
                .collect(),
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini API");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(status.as_u16(), error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let reply = GeminiReply::from_response(body);

        tracing::info!(
            model = %self.model,
            reply_len = reply.text().map(str::len).unwrap_or(0),
            "Gemini API call completed"
        );

        Ok(reply)
    }
}
