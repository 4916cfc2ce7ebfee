//! Token budget calculation for provider calls.
//!
//! The requested word count is translated into an output-token ceiling:
//! roughly 1.5 tokens per word, plus a fixed buffer so the model has room
//! for salutations and the selection marker, clamped to the model's output
//! cap and a global floor. The exact ratio and buffer are tuning values;
//! the clamp-to-[floor, cap] behavior is a hard contract.

use tracing::debug;

/// Never request fewer output tokens than this — sub-floor budgets produce
/// truncated garbage regardless of the requested length.
pub const MIN_OUTPUT_TOKENS: u32 = 200;

/// Word counts above this get a larger buffer: long letters are the ones
/// models are most likely to truncate.
const LONG_LETTER_THRESHOLD: u32 = 500;

const BASE_BUFFER_TOKENS: u32 = 500;
const LONG_LETTER_BUFFER_TOKENS: u32 = 1000;

/// Tokens-per-word estimate. English prose runs ~1.3; 1.5 leaves headroom.
const TOKENS_PER_WORD: f64 = 1.5;

/// Computes the output-token ceiling for one generation call.
///
/// `model_cap` is the per-model output limit supplied by the provider
/// adapter. The result is never below [`MIN_OUTPUT_TOKENS`] and never above
/// `model_cap` (floor wins if a cap below the floor is ever configured).
pub fn output_token_budget(max_length: u32, model_cap: u32) -> u32 {
    let base = (f64::from(max_length) * TOKENS_PER_WORD) as u32;
    let buffer = if max_length > LONG_LETTER_THRESHOLD {
        LONG_LETTER_BUFFER_TOKENS
    } else {
        BASE_BUFFER_TOKENS
    };

    let budget = base
        .saturating_add(buffer)
        .min(model_cap)
        .max(MIN_OUTPUT_TOKENS);

    debug!(
        max_length,
        base, buffer, model_cap, budget, "computed output token budget"
    );

    budget
}
