//! Provider resolution tests.

use chaperone::config::AiConfig;
use chaperone::providers::router::resolve_generator;
use chaperone::providers::ProviderError;

fn base_config() -> AiConfig {
    AiConfig {
        provider: "anthropic".to_owned(),
        api_key: Some("test-key".to_owned()),
        model: "claude-sonnet-4-20250514".to_owned(),
        endpoint: None,
    }
}

#[test]
fn resolves_each_known_provider() {
    for provider in ["anthropic", "openai", "ollama"] {
        let config = AiConfig {
            provider: provider.to_owned(),
            ..base_config()
        };
        let generator = resolve_generator(&config)
            .unwrap_or_else(|e| panic!("{provider} should resolve: {e}"));
        assert_eq!(generator.model_id(), "claude-sonnet-4-20250514");
    }
}

#[test]
fn cloud_provider_without_key_fails_at_resolution() {
    let config = AiConfig {
        api_key: None,
        ..base_config()
    };
    let err = resolve_generator(&config).expect_err("should fail without key");
    assert!(matches!(err, ProviderError::Unavailable(_)));
}

#[test]
fn unknown_provider_names_the_valid_options() {
    let config = AiConfig {
        provider: "bard".to_owned(),
        ..base_config()
    };
    let err = resolve_generator(&config).expect_err("should fail");
    let message = err.to_string();
    assert!(message.contains("anthropic"), "got: {message}");
}
