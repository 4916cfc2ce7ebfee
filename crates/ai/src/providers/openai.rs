//! OpenAI chat-completions adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::assemble;
use crate::budget::output_token_budget;
use crate::errors::GenerationError;
use crate::models::{GenerationRequest, Letter};
use crate::parser::parse_generated;
use crate::prompt::{length_system_prompt, PromptBuilder};
use crate::providers::{http_client, provider_failure, AiClient};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4";
const TEMPERATURE: f64 = 0.7;

/// Per-model output-token caps. Generous: GPT-4-class models handle far
/// larger completions than any sane letter needs.
fn model_output_cap(model: &str) -> u32 {
    match model {
        "gpt-4" | "gpt-4-turbo" | "gpt-4-turbo-preview" => 16_000,
        "gpt-3.5-turbo" => 8_000,
        _ => 8_000,
    }
}

// Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: ChatUsage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

// Client ────────────────────────────────────────────────────────────────────

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    prompts: PromptBuilder,
}

impl OpenAiClient {
    /// Fails if the API key is empty. An empty model falls back to
    /// [`DEFAULT_MODEL`].
    pub fn new(api_key: &str, model: &str) -> Result<Self, GenerationError> {
        if api_key.is_empty() {
            return Err(GenerationError::Configuration(
                "OpenAI API key is required".to_string(),
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
impl AiClient for OpenAiClient {
    async fn generate_letter(
        &self,
        request: &GenerationRequest,
    ) -> Result<Letter, GenerationError> {
        let prompt = self.prompts.render(request);
        let max_tokens = output_token_budget(request.max_length, model_output_cap(&self.model));
        let system = length_system_prompt(request.max_length);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_failure("openai", response).await);
        }

        let completion: ChatResponse = response.json().await?;
        let tokens_used = completion.usage.total_tokens;
        debug!(tokens_used, model = %self.model, "openai completion received");

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::EmptyCompletion { provider: "openai" })?;

        let parsed = parse_generated(&content, &request.available_representatives)?;
        Ok(assemble(request, parsed, "openai", &self.model, tokens_used))
    }

    fn validate_api_key(&self) -> Result<(), GenerationError> {
        if self.api_key.len() < 20 || !self.api_key.starts_with("sk-") {
            return Err(GenerationError::Configuration(
                "invalid OpenAI API key format".to_string(),
            ));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn estimate_cost(&self, _request: &GenerationRequest) -> f64 {
        match self.model.as_str() {
            "gpt-4" => 0.05,
            "gpt-3.5-turbo" => 0.01,
            _ => 0.03,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_KEY: &str = "sk-0123456789abcdef0123456789";

    fn client() -> OpenAiClient {
        OpenAiClient::new(VALID_KEY, "").unwrap()
    }

    #[test]
    fn test_empty_api_key_is_rejected_at_construction() {
        assert!(matches!(
            OpenAiClient::new("", "gpt-4"),
            Err(GenerationError::Configuration(_))
        ));
    }

    #[test]
    fn test_default_model_is_substituted() {
        assert_eq!(client().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_validate_api_key_checks_prefix_and_length() {
        assert!(client().validate_api_key().is_ok());
        let bad_prefix = OpenAiClient::new("pk-0123456789abcdef0123456789", "").unwrap();
        assert!(bad_prefix.validate_api_key().is_err());
        let too_short = OpenAiClient::new("sk-short", "").unwrap();
        assert!(too_short.validate_api_key().is_err());
    }

    #[test]
    fn test_estimate_cost_follows_model_table() {
        let gpt4 = OpenAiClient::new(VALID_KEY, "gpt-4").unwrap();
        let gpt35 = OpenAiClient::new(VALID_KEY, "gpt-3.5-turbo").unwrap();
        let other = OpenAiClient::new(VALID_KEY, "gpt-4o-mini").unwrap();
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "main_issue": "x", "specific_issue": "x", "requested_action": "x",
            "user_name": "x", "user_zip_code": "x",
            "available_representatives": [], "tone": "professional", "max_length": 100
        }))
        .unwrap();
        assert_eq!(gpt4.estimate_cost(&request), 0.05);
        assert_eq!(gpt35.estimate_cost(&request), 0.01);
        assert_eq!(other.estimate_cost(&request), 0.03);
    }

    #[test]
    fn test_model_cap_tiers() {
        assert_eq!(model_output_cap("gpt-4"), 16_000);
        assert_eq!(model_output_cap("gpt-4-turbo"), 16_000);
        assert_eq!(model_output_cap("gpt-3.5-turbo"), 8_000);
        assert_eq!(model_output_cap("something-else"), 8_000);
    }

    #[test]
    fn test_request_envelope_shape() {
        let body = ChatRequest {
            model: "gpt-4",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "be brief",
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            max_tokens: 950,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["max_tokens"], 950);
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_response_envelope_text_location() {
        let json = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "SELECTED_REPRESENTATIVE_ID: 1\nDear..."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 300, "completion_tokens": 500, "total_tokens": 800}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.usage.total_tokens, 800);
        assert!(response.choices[0]
            .message
            .content
            .starts_with("SELECTED_REPRESENTATIVE_ID: 1"));
    }

    #[test]
    fn test_empty_choices_deserialize_cleanly() {
        let json = r#"{"choices": [], "usage": {"total_tokens": 12}}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices.is_empty());
    }
}
