//! Environment-driven configuration for the generation core.
//!
//! Only the AI-facing settings live here; database, email, and scheduler
//! configuration belong to the surrounding application.

use anyhow::{Context, Result};

use crate::models::Tone;

const DEFAULT_PROVIDER: &str = "openai";
const DEFAULT_MAX_LENGTH: u32 = 500;

/// AI provider selection, credentials, and letter defaults.
///
/// Model fields are left empty when unset — each provider adapter
/// substitutes its own default model.
#[derive(Debug, Clone)]
pub struct Config {
    /// "openai" or "anthropic".
    pub provider: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    pub default_tone: Tone,
    pub default_max_length: u32,
}

impl Config {
    /// Loads configuration from the environment (and `.env` if present).
    ///
    /// Keys may be absent here — a missing key only becomes an error when a
    /// client for that provider is constructed. Malformed numeric or tone
    /// values are errors, not silent defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_tone = match optional_env("LETTER_TONE") {
            Some(raw) => raw
                .parse::<Tone>()
                .map_err(anyhow::Error::msg)
                .context("LETTER_TONE must be professional, passionate, or conversational")?,
            None => Tone::default(),
        };

        let default_max_length = match optional_env("LETTER_MAX_LENGTH") {
            Some(raw) => raw
                .parse::<u32>()
                .context("LETTER_MAX_LENGTH must be a positive integer")?,
            None => DEFAULT_MAX_LENGTH,
        };

        Ok(Config {
            provider: optional_env("AI_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_default(),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_model: optional_env("ANTHROPIC_MODEL").unwrap_or_default(),
            default_tone,
            default_max_length,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
