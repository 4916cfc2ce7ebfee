//! Provider clients — the only code in this crate that talks to the network.
//!
//! Two vendors are supported. They differ only in wire shape: request
//! envelope, auth header, where the generated text lives in the response,
//! and the pricing/cap tables. Everything else (prompt, budget, parsing,
//! assembly) is shared.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::errors::GenerationError;
use crate::models::{GenerationRequest, Letter};

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

/// One outbound call per generation; the whole round-trip is bounded by
/// this timeout, after which the call fails with a Transport error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Uniform capability set over LLM vendors.
///
/// Implementations hold only immutable configuration and may serve
/// concurrent calls. Cancellation is cooperative: dropping the future
/// aborts the in-flight request.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Generates, parses, validates, and assembles one letter.
    /// Exactly one network round-trip; no internal retries.
    async fn generate_letter(&self, request: &GenerationRequest)
        -> Result<Letter, GenerationError>;

    /// Cheap offline format check of the configured key — not a live
    /// credential check.
    fn validate_api_key(&self) -> Result<(), GenerationError>;

    fn provider_name(&self) -> &'static str;

    /// Static per-model USD estimate for one letter. No I/O.
    fn estimate_cost(&self, request: &GenerationRequest) -> f64;
}

/// Builds the client selected by `config.provider`.
pub fn create_client(config: &Config) -> Result<Arc<dyn AiClient>, GenerationError> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiClient::new(
            &config.openai_api_key,
            &config.openai_model,
        )?)),
        "anthropic" => Ok(Arc::new(AnthropicClient::new(
            &config.anthropic_api_key,
            &config.anthropic_model,
        )?)),
        other => Err(GenerationError::Configuration(format!(
            "unsupported AI provider: {other}"
        ))),
    }
}

/// The shared HTTP client: JSON over HTTPS with the fixed call timeout.
pub(crate) fn http_client() -> Result<reqwest::Client, GenerationError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GenerationError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Maps a non-success provider response to the error taxonomy, preserving
/// the raw body for diagnostics. 429 is split out as provisionally
/// retryable; everything else is a request-specific provider failure.
pub(crate) async fn provider_failure(
    provider: &'static str,
    response: reqwest::Response,
) -> GenerationError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(provider, status, "provider returned non-success status");

    if status == 429 {
        GenerationError::RateLimited { provider, body }
    } else {
        GenerationError::Provider {
            provider,
            status,
            body,
        }
    }
}
