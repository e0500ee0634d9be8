// Gemini-specific client implementation

use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::Content;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Finish reasons that still carry a usable answer
const COMPLETED_FINISH_REASONS: &[&str] = &["STOP", "MAX_TOKENS"];

/// Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create new client with API key.
    ///
    /// An empty key is accepted here; every call then fails with a
    /// configuration error instead.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::build(api_key.into(), GEMINI_API_BASE.to_string(), None)
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::build(api_key.into(), GEMINI_API_BASE.to_string(), Some(timeout))
    }

    /// Point the client at another host (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build(api_key: String, base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Build generateContent request payload
    fn build_payload(&self, contents: &[Content], options: &ChatOptions) -> Result<Value> {
        let mut request = serde_json::json!({
            "contents": serde_json::to_value(contents)?,
        });

        if !options.is_empty() {
            let mut generation = serde_json::Map::new();
            if let Some(temp) = options.temperature {
                generation.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max_tokens) = options.max_output_tokens {
                generation.insert("maxOutputTokens".to_string(), serde_json::json!(max_tokens));
            }
            if let Some(obj) = request.as_object_mut() {
                obj.insert("generationConfig".to_string(), Value::Object(generation));
            }
        }

        Ok(request)
    }
}

#[async_trait]
impl ChatClient for GeminiClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        if !self.has_api_key() {
            anyhow::bail!("Google AI API key is not configured");
        }
        match request.last_turn() {
            Some(turn) if !turn.is_empty() => {}
            _ => anyhow::bail!("Request contains no input parts"),
        }

        let payload = self.build_payload(&request.contents, &request.options)?;

        tracing::debug!(
            model = %request.model,
            turns = request.contents.len(),
            "Sending generateContent request"
        );

        let response = self
            .http_client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        let raw: Value = response
            .json()
            .await
            .context("Failed to parse response")?;
        let parsed: GenerateContentResponse =
            serde_json::from_value(raw.clone()).context("Unexpected response shape")?;

        into_chat_response(parsed, raw)
    }
}

fn into_chat_response(parsed: GenerateContentResponse, raw: Value) -> Result<ChatResponse> {
    let usage = parsed.usage_metadata.map(|u| TokenUsage {
        input_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        match parsed.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => anyhow::bail!("Prompt was blocked: {}", reason),
            None => anyhow::bail!("Gemini returned no candidates"),
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        if let Some(reason) = candidate.finish_reason.as_deref() {
            if !COMPLETED_FINISH_REASONS.contains(&reason) {
                anyhow::bail!("Response was blocked: {}", reason);
            }
        }
    }

    Ok(ChatResponse {
        text,
        finish_reason: candidate.finish_reason,
        usage,
        raw,
    })
}

// ============================================================================
// GEMINI-SPECIFIC RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}
