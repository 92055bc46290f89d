//! Provider resolution from configuration.
//!
//! Maps the configured `provider` name to a [`TextGenerator`] instance.
//! Misconfiguration surfaces here, at resolution time, so an analysis
//! call never discovers a missing key halfway through.

use std::sync::Arc;

use crate::config::AiConfig;

use super::anthropic::AnthropicGenerator;
use super::ollama::OllamaGenerator;
use super::openai::OpenAiGenerator;
use super::{ProviderError, TextGenerator};

/// Resolve the configured provider into a shareable generator.
///
/// # Errors
///
/// Returns [`ProviderError::Unavailable`] for an unknown provider name or
/// a cloud provider configured without an API key.
pub fn resolve_generator(config: &AiConfig) -> Result<Arc<dyn TextGenerator>, ProviderError> {
    match config.provider.as_str() {
        "anthropic" => {
            let api_key = require_key(config, "anthropic")?;
            Ok(Arc::new(AnthropicGenerator::new(
                config.model.clone(),
                api_key,
                config.endpoint.clone(),
            )))
        }
        "openai" => {
            let api_key = require_key(config, "openai")?;
            Ok(Arc::new(OpenAiGenerator::new(
                config.model.clone(),
                api_key,
                config.endpoint.clone(),
            )))
        }
        "ollama" => Ok(Arc::new(OllamaGenerator::new(
            config.model.clone(),
            config.endpoint.clone(),
        ))),
        other => Err(ProviderError::Unavailable(format!(
            "unknown provider {other:?}, expected anthropic, openai, or ollama"
        ))),
    }
}

fn require_key(config: &AiConfig, provider: &str) -> Result<String, ProviderError> {
    config
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ProviderError::Unavailable(format!("provider {provider} requires an api key"))
        })
}
