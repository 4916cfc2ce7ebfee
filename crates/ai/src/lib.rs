//! AI-driven advocacy letter generation.
//!
//! Turns a structured advocacy request plus a list of candidate
//! representatives into a letter addressed to exactly one of them, using an
//! LLM provider as an untrusted text generator. The provider's output must
//! open with a machine-parsable marker line declaring the selected
//! candidate; responses that fail the marker, id, body, or
//! name-consistency checks are rejected rather than guessed at.
//!
//! Pipeline: request + candidates → [`prompt::PromptBuilder`] →
//! provider client (budgeted by [`budget::output_token_budget`]) → raw text
//! → [`parser::parse_generated`] → [`assembler::assemble`] → [`Letter`].
//!
//! ```no_run
//! use lettersmith_ai::{create_client, Config};
//!
//! # async fn run(request: lettersmith_ai::GenerationRequest) -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let client = create_client(&config)?;
//! let letter = client.generate_letter(&request).await?;
//! println!("{}: {}", letter.subject, letter.metadata.selected_representative_id);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod budget;
pub mod config;
pub mod directory;
pub mod errors;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod providers;

pub use config::Config;
pub use directory::CandidateDirectory;
pub use errors::{GenerationError, ValidationError};
pub use models::{GenerationRequest, Letter, Metadata, RepresentativeOption, Tone};
pub use providers::{create_client, AiClient, AnthropicClient, OpenAiClient};
