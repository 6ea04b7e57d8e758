//! Chat completion client — one POST per filter request, no retries.

use super::prompts::{MAX_TOKENS, MODEL, SYSTEM_PROMPT};
use std::time::Instant;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Sends a prompt to a chat completion endpoint and returns the first
/// choice's text. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(OPENAI_CHAT_URL, api_key)
    }

    /// Client for an alternate endpoint speaking the same protocol.
    pub fn with_endpoint(endpoint: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a completion for `prompt`.
    ///
    /// Transport failures, non-success statuses, and envelopes without
    /// `choices[0].message.content` all surface as one `FetchError`.
    /// No timeout is applied here.
    pub async fn complete(&self, prompt: &str) -> Result<String, FetchError> {
        log::info!("[LLM] Model: {}", MODEL);
        let start = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": MODEL,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt },
                ],
                "max_tokens": MAX_TOKENS,
            }))
            .send()
            .await
            .map_err(|e| {
                log::error!("[LLM] HTTP request failed: {}", e);
                FetchError::new(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("[LLM] API returned {}: {}", status, body);
            return Err(FetchError::new(format!("service returned {status}")));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            log::error!("[LLM] Response body is not JSON: {}", e);
            FetchError::new("response body is not JSON")
        })?;

        log::info!("[LLM] API latency: {}ms", start.elapsed().as_millis());

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                log::error!("[LLM] Response missing choices[0].message.content");
                FetchError::new("response has no completion text")
            })?;

        Ok(content.trim().to_string())
    }
}

/// The single "fetch failed" condition. `reason` is diagnostic only.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Error fetching response: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
