/// Model client: the single point of entry for generative model calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the model endpoint directly.
/// Everything goes through `ModelClient`, which makes exactly one request per call.
/// There is no retry here; the orchestrator decides what a failure means.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod prompts;

/// Default model tag served by the local Ollama instance.
pub const DEFAULT_MODEL: &str = "gemma3:12b";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model request timed out after {}s", .after.as_secs_f32())]
    Timeout { after: Duration },

    #[error("model request failed (status {status}): {body}")]
    RequestFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode model response: {0}")]
    Decode(String),
}

impl ModelError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ModelError::Timeout { .. })
    }
}

/// Seam between the pipeline and the generative model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends one prompt and returns the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Whether the endpoint answers at all. Never gates generation.
    async fn health(&self) -> bool;

    fn model_name(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// `POST {base}/api/generate` against an Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    async fn send(&self, prompt: &str) -> Result<String, ModelError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model endpoint returned {status}: {body}");
            return Err(ModelError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ModelError::Decode(e.to_string()))?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        info!(
            "Calling model {} ({} chars, timeout {}s)",
            self.model,
            prompt.len(),
            self.timeout.as_secs()
        );
        let started = std::time::Instant::now();

        let text = match tokio::time::timeout(self.timeout, self.send(prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(ModelError::Http(e))) if e.is_timeout() => {
                return Err(ModelError::Timeout {
                    after: self.timeout,
                })
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                warn!("Model call exceeded {}s", self.timeout.as_secs());
                return Err(ModelError::Timeout {
                    after: self.timeout,
                });
            }
        };

        debug!(
            "Model responded in {:.2}s with {} chars",
            started.elapsed().as_secs_f32(),
            text.len()
        );
        Ok(text)
    }

    async fn health(&self) -> bool {
        let probe = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await;
        match probe {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Model health probe failed: {e}");
                false
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
