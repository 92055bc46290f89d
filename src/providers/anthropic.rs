//! Anthropic text generation using the `/v1/messages` API.

use serde::{Deserialize, Serialize};

use super::{check_http_response, ProviderError, TextGenerator};

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 2048;

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Anthropic messages API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    /// Model identifier.
    pub model: String,
    /// Single-turn conversation carrying the prompt.
    pub messages: Vec<AnthropicMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// A message in Anthropic format.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role: always `user` for a generation request.
    pub role: String,
    /// Prompt text.
    pub content: String,
}

/// Anthropic API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    /// Content blocks in the response.
    pub content: Vec<AnthropicContentBlock>,
}

/// A content block in the Anthropic response.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContentBlock {
    /// Text content.
    Text {
        /// The text.
        text: String,
    },
    /// Any non-text block; ignored when extracting generated text.
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build an Anthropic API request for a single prompt.
#[doc(hidden)]
pub fn build_request(model: &str, prompt: &str) -> AnthropicRequest {
    AnthropicRequest {
        model: model.to_owned(),
        messages: vec![AnthropicMessage {
            role: "user".to_owned(),
            content: prompt.to_owned(),
        }],
        max_tokens: DEFAULT_MAX_TOKENS,
    }
}

/// Parse an Anthropic API response into generated text.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the response cannot be deserialized.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let resp: AnthropicResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let text: String = resp
        .content
        .into_iter()
        .filter_map(|block| match block {
            AnthropicContentBlock::Text { text } => Some(text),
            AnthropicContentBlock::Other => None,
        })
        .collect();

    Ok(text)
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Anthropic messages API text generator.
#[derive(Debug, Clone)]
pub struct AnthropicGenerator {
    model: String,
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl AnthropicGenerator {
    /// Create a generator for a model, optionally overriding the endpoint.
    pub fn new(model: String, api_key: String, endpoint: Option<String>) -> Self {
        Self {
            model,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| ANTHROPIC_API_BASE.to_owned()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(&self.model, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
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
