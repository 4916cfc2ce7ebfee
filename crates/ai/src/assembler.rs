//! Letter assembly — packages validated output into the returned artifact.

use chrono::Utc;

use crate::models::{GenerationRequest, Letter, Metadata};
use crate::parser::ParsedLetter;

/// Builds the final [`Letter`] from a validated parse plus provider
/// metadata. Pure: no I/O, no failure modes of its own.
///
/// The subject is derived here, not provider-generated: a fixed template
/// over the main issue and the selected representative's state.
pub fn assemble(
    request: &GenerationRequest,
    parsed: ParsedLetter,
    provider: &str,
    model: &str,
    tokens_used: u32,
) -> Letter {
    let subject = format!(
        "Advocacy Letter: {} - {} Constituent",
        request.main_issue, parsed.representative.state
    );
    let actual_word_count = parsed.body.split_whitespace().count();
    let now = Utc::now();

    Letter {
        subject,
        content: parsed.body,
        metadata: Metadata {
            provider: provider.to_string(),
            model: model.to_string(),
            tokens_used,
            generated_at: now,
            tone: request.tone,
            theme: request.main_issue.clone(),
            max_length: request.max_length,
            actual_word_count,
            selected_representative_id: parsed.selected_id,
        },
        created_at: now,
        selected_representative: parsed.representative,
    }
}
