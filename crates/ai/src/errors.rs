//! Error taxonomy for the generation pipeline.
//!
//! Every failure surfaces to the immediate caller with enough context to
//! diagnose (raw status/body, or an excerpt of the offending text). Nothing
//! is swallowed or defaulted, and no retries happen inside this crate —
//! `is_retryable` tells the caller which failures are worth retrying.

use thiserror::Error;

/// Top-level error for letter generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing/invalid API key, unsupported provider name, or a client that
    /// could not be constructed. Fatal to that client instance.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The prompt template is unusable (missing a required placeholder).
    #[error("prompt template error: {0}")]
    Template(String),

    /// Network failure or timeout reaching the provider.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 429 from the provider. Transient; back off before retrying.
    #[error("{provider} rate limit exceeded (429): {body}")]
    RateLimited { provider: &'static str, body: String },

    /// Any other non-success provider response.
    #[error("{provider} API returned status {status}: {body}")]
    Provider {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// A success envelope that carried no generated text.
    #[error("{provider} returned no generated text")]
    EmptyCompletion { provider: &'static str },

    /// No selection marker found anywhere in the generated text. There is
    /// deliberately no fallback selection — an unparsable response is
    /// rejected, not guessed at.
    #[error("could not find SELECTED_REPRESENTATIVE_ID in generated text: {excerpt}")]
    MissingMarker { excerpt: String },

    /// The marker parsed, but the response failed a consistency rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Consistency failures on an otherwise well-formed response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("selected representative id {0} not found in available representatives")]
    UnknownRepresentative(i64),

    #[error("no letter content found after the selection marker")]
    EmptyBody,

    /// The body never mentions the representative the model claimed to
    /// select — it likely wrote to a different one.
    #[error("letter content does not mention selected representative {name} (id {id})")]
    NameMismatch { name: String, id: i64 },
}

impl GenerationError {
    /// Whether the caller may reasonably retry the same request.
    ///
    /// Transport failures and 429s are transient; everything else is
    /// request-specific and will fail again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Transport(_) | GenerationError::RateLimited { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        let err = GenerationError::RateLimited {
            provider: "openai",
            body: "quota exceeded".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_request_specific_errors_are_not_retryable() {
        let errs = [
            GenerationError::Configuration("no key".to_string()),
            GenerationError::Provider {
                provider: "anthropic",
                status: 400,
                body: "bad request".to_string(),
            },
            GenerationError::MissingMarker {
                excerpt: "Dear...".to_string(),
            },
            GenerationError::Validation(ValidationError::EmptyBody),
        ];
        for err in errs {
            assert!(!err.is_retryable(), "{err} must not be retryable");
        }
    }

    #[test]
    fn test_validation_error_message_carries_context() {
        let err = GenerationError::Validation(ValidationError::NameMismatch {
            name: "Jane Doe".to_string(),
            id: 3,
        });
        let msg = err.to_string();
        assert!(msg.contains("Jane Doe"));
        assert!(msg.contains("id 3"));
    }
}
