//! Prompt construction for letter generation.
//!
//! The advocacy template is bundled into the binary and injected into a
//! [`PromptBuilder`] at construction — no process-wide template state.
//! Rendering is pure string substitution: identical input always produces
//! an identical prompt.

use crate::errors::GenerationError;
use crate::models::{GenerationRequest, RepresentativeOption};

/// The bundled advocacy prompt template.
const ADVOCACY_PROMPT_TEMPLATE: &str = include_str!("templates/advocacy-prompt.txt");

/// Placeholders a usable template must contain. Checked at construction so
/// a broken template fails at startup, not on the first request.
const REQUIRED_PLACEHOLDERS: &[&str] = &[
    "{available_representatives}",
    "{main_issue}",
    "{specific_concern}",
    "{requested_action}",
    "{constituent_name}",
    "{constituent_zip}",
    "{tone}",
    "{max_length}",
];

/// Renders the instruction+data prompt for one generation request.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl PromptBuilder {
    /// Builder over the bundled advocacy template.
    pub fn bundled() -> Result<Self, GenerationError> {
        Self::from_template(ADVOCACY_PROMPT_TEMPLATE)
    }

    /// Builder over a caller-supplied template. Fails if any required
    /// placeholder is missing.
    pub fn from_template(template: &str) -> Result<Self, GenerationError> {
        for placeholder in REQUIRED_PLACEHOLDERS {
            if !template.contains(placeholder) {
                return Err(GenerationError::Template(format!(
                    "template is missing required placeholder {placeholder}"
                )));
            }
        }
        Ok(Self {
            template: template.to_string(),
        })
    }

    /// Renders the full prompt for a request. Deterministic; no I/O.
    pub fn render(&self, request: &GenerationRequest) -> String {
        self.template
            .replace(
                "{available_representatives}",
                &render_candidates(&request.available_representatives),
            )
            .replace("{main_issue}", &request.main_issue)
            .replace("{specific_concern}", &request.specific_issue)
            .replace("{requested_action}", &request.requested_action)
            .replace("{constituent_name}", &request.user_name)
            .replace("{constituent_zip}", &request.user_zip_code)
            .replace("{tone}", &request.tone.to_string())
            .replace("{max_length}", &request.max_length.to_string())
    }
}

/// System-role instruction reinforcing the target length. Sent alongside
/// the user prompt by adapters whose API accepts a system message.
pub fn length_system_prompt(max_length: u32) -> String {
    format!(
        "You are an expert advocacy letter writer. When asked to write a {max_length}-word \
         letter, you MUST write exactly that length. Longer letters require comprehensive, \
         detailed content with multiple well-developed sections. Do not write short letters \
         when long ones are requested."
    )
}

/// One line per candidate: id, name, title, state, and party/district when
/// known. The id shown here is what the model must echo in the marker line.
fn render_candidates(candidates: &[RepresentativeOption]) -> String {
    candidates
        .iter()
        .map(|rep| {
            let mut line = format!(
                "ID: {} | {} | {} | {}",
                rep.id, rep.name, rep.title, rep.state
            );
            if let Some(party) = &rep.party {
                line.push_str(&format!(" | {party}"));
            }
            if let Some(district) = &rep.district {
                line.push_str(&format!(" | District {district}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
