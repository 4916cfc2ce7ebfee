//! Parsing and validation of raw generated text.
//!
//! The model's response is untrusted. It must open with a marker line
//! declaring which candidate it selected; everything after that line is the
//! letter body. A response that cannot be confidently parsed is rejected
//! outright — a wrongly-addressed letter is worse than no letter, so there
//! is no fallback selection and the match rules are deliberately strict.
//!
//! The scan runs line by line: look for a marker, then extract the body,
//! then check the body against the declared selection.

use tracing::warn;

use crate::errors::{GenerationError, ValidationError};
use crate::models::RepresentativeOption;

/// Outcome of parsing one raw response against a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLetter {
    pub selected_id: i64,
    pub body: String,
    pub representative: RepresentativeOption,
}

/// Parses the selection marker and letter body out of raw generated text
/// and validates both against the candidate set.
///
/// Rules, in order:
/// 1. Scan lines case-insensitively for a marker carrying "SELECTED",
///    "REPRESENTATIVE", and "ID:" (underscore or space phrasing) with a
///    parsable trailing integer. A token match without an integer does not
///    stop the scan. No marker anywhere → [`GenerationError::MissingMarker`].
/// 2. The marked id must exist in `candidates`.
/// 3. The body is every line strictly after the marker, trimmed; it must be
///    non-empty.
/// 4. The body must contain the selected representative's display name as a
///    literal substring. This is a full-display-name match: a letter using
///    only a title/last-name form is rejected. Intentional — do not broaden
///    without revisiting the consistency guarantee.
pub fn parse_generated(
    content: &str,
    candidates: &[RepresentativeOption],
) -> Result<ParsedLetter, GenerationError> {
    let lines: Vec<&str> = content.lines().collect();

    let Some((marker_index, selected_id)) = find_marker(&lines) else {
        warn!(
            excerpt = %excerpt(content, 200),
            "no selection marker in generated text"
        );
        return Err(GenerationError::MissingMarker {
            excerpt: excerpt(content, 500),
        });
    };

    let representative = candidates
        .iter()
        .find(|rep| rep.id == selected_id)
        .cloned()
        .ok_or(ValidationError::UnknownRepresentative(selected_id))?;

    let body = lines[marker_index + 1..].join("\n").trim().to_string();
    if body.is_empty() {
        return Err(ValidationError::EmptyBody.into());
    }

    if !body.contains(&representative.name) {
        return Err(ValidationError::NameMismatch {
            name: representative.name.clone(),
            id: selected_id,
        }
        .into());
    }

    Ok(ParsedLetter {
        selected_id,
        body,
        representative,
    })
}

/// Scans for the first line that both looks like a selection marker and
/// carries a parsable integer after its colon.
fn find_marker(lines: &[&str]) -> Option<(usize, i64)> {
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let upper = trimmed.to_uppercase();

        // Accept "SELECTED_REPRESENTATIVE_ID: 5" and "SELECTED REPRESENTATIVE ID: 5".
        if upper.contains("SELECTED") && upper.contains("REPRESENTATIVE") && upper.contains("ID:") {
            if let Some(id_part) = trimmed.split(':').nth(1) {
                if let Ok(id) = id_part.trim().parse::<i64>() {
                    return Some((index, id));
                }
            }
        }
    }
    None
}

/// Char-boundary-safe prefix of `content` for error context.
fn excerpt(content: &str, max_chars: usize) -> String {
    content.chars().take(max_chars).collect()
}
