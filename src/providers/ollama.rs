//! Local text generation using the Ollama `/api/chat` API.

use serde::{Deserialize, Serialize};

use super::{check_http_response, ProviderError, TextGenerator};

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Ollama chat API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct OllamaRequest {
    /// Model name.
    pub model: String,
    /// Single-turn conversation carrying the prompt.
    pub messages: Vec<OllamaMessage>,
    /// Always `false`: the full response is needed in one body.
    pub stream: bool,
}

/// A message in Ollama chat format.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaMessage {
    /// Role (`user` or `assistant`).
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Ollama chat API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct OllamaResponse {
    /// Response message.
    pub message: OllamaMessage,
}

// ---------------------------------------------------------------------------
// Request / Response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build an Ollama API request for a single prompt.
#[doc(hidden)]
pub fn build_request(model: &str, prompt: &str) -> OllamaRequest {
    OllamaRequest {
        model: model.to_owned(),
        messages: vec![OllamaMessage {
            role: "user".to_owned(),
            content: prompt.to_owned(),
        }],
        stream: false,
    }
}

/// Parse an Ollama API response into generated text.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the response cannot be deserialized.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let resp: OllamaResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    Ok(resp.message.content)
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Ollama chat API text generator.
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OllamaGenerator {
    /// Create a generator for a model, optionally overriding the base URL.
    pub fn new(model: String, endpoint: Option<String>) -> Self {
        Self {
            model,
            base_url: endpoint.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_owned()),
            client: reqwest::Client::new(),
        }
    }

    /// Check whether the Ollama server is reachable.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}

#[async_trait::async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_request = build_request(&self.model, prompt);
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url).json(&api_request).send().await?;

        let payload = check_http_response(response).await?;
        parse_response(&payload)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
