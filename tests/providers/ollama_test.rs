//! Ollama wire format tests.

use chaperone::providers::ollama::{build_request, parse_response};
use serde_json::json;

#[test]
fn build_request_disables_streaming() {
    let req = build_request("llama3", "Assess this conversation.");
    assert_eq!(req.model, "llama3");
    assert!(!req.stream);
    assert_eq!(req.messages[0].content, "Assess this conversation.");
}

#[test]
fn parse_response_extracts_message_content() {
    let body = json!({
        "model": "llama3",
        "message": {"role": "assistant", "content": "{\"trustScore\": 60}"},
        "done": true
    });
    let text = parse_response(&body.to_string()).expect("should parse");
    assert_eq!(text, "{\"trustScore\": 60}");
}

#[test]
fn parse_response_rejects_missing_message() {
    let body = json!({"model": "llama3", "done": true});
    assert!(parse_response(&body.to_string()).is_err());
}
