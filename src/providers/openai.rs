//! OpenAI-compatible text generation using the `/v1/chat/completions` API.
//!
//! The endpoint is overridable, so this generator also covers self-hosted
//! gateways and other vendors that speak the same wire format.

use serde::{Deserialize, Serialize};

use super::{check_http_response, ProviderError, TextGenerator};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MAX_TOKENS: u32 = 2048;

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// OpenAI chat completions API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OpenAiRequest {
    /// Model identifier.
    pub model: String,
    /// Single-turn conversation carrying the prompt.
    pub messages: Vec<OpenAiMessage>,
    /// Maximum completion tokens.
    pub max_tokens: u32,
}

/// A message in OpenAI chat format.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Role (`user` for the prompt, `assistant` in responses).
    pub role: String,
    /// Message text.
    pub content: Option<String>,
}

/// OpenAI chat completions API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    /// Completion choices; the first is used.
    pub choices: Vec<OpenAiChoice>,
}

/// A completion choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OpenAiChoice {
    /// The generated message.
    pub message: OpenAiMessage,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build an OpenAI API request for a single prompt.
#[doc(hidden)]
pub fn build_request(model: &str, prompt: &str) -> OpenAiRequest {
    OpenAiRequest {
        model: model.to_owned(),
        messages: vec![OpenAiMessage {
            role: "user".to_owned(),
            content: Some(prompt.to_owned()),
        }],
        max_tokens: DEFAULT_MAX_TOKENS,
    }
}

/// Parse an OpenAI API response into generated text.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the response cannot be deserialized
/// or contains no choices.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let resp: OpenAiResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("response contained no choices".to_owned()))?;

    Ok(choice.message.content.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat completions text generator.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    model: String,
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    /// Create a generator for a model, optionally overriding the endpoint.
    pub fn new(model: String, api_key: String, endpoint: Option<String>) -> Self {
        Self {
            model,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| OPENAI_API_BASE.to_owned()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&api_request)
            .send()
            .await?;

        let payload = check_http_response(response).await?;
        parse_response(&payload)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
