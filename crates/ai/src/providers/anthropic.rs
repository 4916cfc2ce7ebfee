//! Anthropic messages adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::assemble;
use crate::budget::output_token_budget;
use crate::errors::GenerationError;
use crate::models::{GenerationRequest, Letter};
use crate::parser::parse_generated;
use crate::prompt::PromptBuilder;
use crate::providers::{http_client, provider_failure, AiClient};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Output-token cap for the messages API as configured here.
const MODEL_OUTPUT_CAP: u32 = 4_000;

// Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    /// The generated text lives in the first block of type `text`.
    fn text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
    }
}

// Client ────────────────────────────────────────────────────────────────────

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    prompts: PromptBuilder,
}

impl AnthropicClient {
    /// Fails if the API key is empty. An empty model falls back to
    /// [`DEFAULT_MODEL`].
    pub fn new(api_key: &str, model: &str) -> Result<Self, GenerationError> {
        if api_key.is_empty() {
            return Err(GenerationError::Configuration(
                "Anthropic API key is required".to_string(),
            ));
        }
        let model = if model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.to_string()
        };

        Ok(Self {
            http: http_client()?,
            api_key: api_key.to_string(),
            model,
            prompts: PromptBuilder::bundled()?,
        })
    }
}

#[async_trait]
impl AiClient for AnthropicClient {
    async fn generate_letter(
        &self,
        request: &GenerationRequest,
    ) -> Result<Letter, GenerationError> {
        let prompt = self.prompts.render(request);
        let max_tokens = output_token_budget(request.max_length, MODEL_OUTPUT_CAP);

        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_failure("anthropic", response).await);
        }

        let completion: MessagesResponse = response.json().await?;
        let tokens_used = completion.usage.input_tokens + completion.usage.output_tokens;
        debug!(tokens_used, model = %self.model, "anthropic completion received");

        let content = completion.text().ok_or(GenerationError::EmptyCompletion {
            provider: "anthropic",
        })?;

        let parsed = parse_generated(&content, &request.available_representatives)?;
        Ok(assemble(
            request,
            parsed,
            "anthropic",
            &self.model,
            tokens_used,
        ))
    }

    fn validate_api_key(&self) -> Result<(), GenerationError> {
        if self.api_key.len() < 20 || !self.api_key.starts_with("sk-ant-") {
            return Err(GenerationError::Configuration(
                "invalid Anthropic API key format".to_string(),
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn estimate_cost(&self, _request: &GenerationRequest) -> f64 {
        match self.model.as_str() {
            "claude-3-opus-20240229" => 0.08,
            "claude-3-sonnet-20240229" => 0.04,
            "claude-3-haiku-20240307" => 0.02,
            _ => 0.04,
        }
    }
}
