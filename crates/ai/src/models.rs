//! Data model for letter generation.
//!
//! Everything here is a per-call value snapshot: a `GenerationRequest` goes
//! in, a `Letter` comes out, and nothing is retained between calls.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One representative eligible for selection in a generation request.
///
/// Ids are unique within the candidate set of a single request — the
/// response parser relies on this to resolve the model's selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeOption {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

/// Style hint for the generated letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Passionate,
    Conversational,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tone::Professional => "professional",
            Tone::Passionate => "passionate",
            Tone::Conversational => "conversational",
        };
        f.write_str(s)
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professional" => Ok(Tone::Professional),
            "passionate" => Ok(Tone::Passionate),
            "conversational" => Ok(Tone::Conversational),
            other => Err(format!("unknown tone: {other}")),
        }
    }
}

/// Parameters for one letter generation call.
///
/// Immutable once constructed; owned by the caller for the duration of the
/// call. The candidate set is the full universe the model may select from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub main_issue: String,
    pub specific_issue: String,
    pub requested_action: String,
    pub user_name: String,
    pub user_zip_code: String,
    pub available_representatives: Vec<RepresentativeOption>,
    pub tone: Tone,
    /// Target word count for the letter body.
    pub max_length: u32,
}

/// Generation metadata, duplicated into the letter for audit/debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub provider: String,
    pub model: String,
    /// Provider-reported token usage for the whole call.
    pub tokens_used: u32,
    pub generated_at: DateTime<Utc>,
    pub tone: Tone,
    /// The advocacy theme — mirrors the request's main issue.
    pub theme: String,
    pub max_length: u32,
    pub actual_word_count: usize,
    pub selected_representative_id: i64,
}

/// A generated advocacy letter.
///
/// `content` is the letter body only — the machine-parsable selection
/// marker is consumed during parsing and never surfaced here. The selected
/// representative is stored by value, copied from the request's candidate
/// set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Letter {
    pub subject: String,
    pub content: String,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub selected_representative: RepresentativeOption,
}
