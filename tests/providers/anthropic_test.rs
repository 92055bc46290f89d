//! Anthropic wire format tests.

use chaperone::providers::anthropic::{build_request, parse_response};
use serde_json::json;

#[test]
fn build_request_sets_model_and_prompt() {
    let req = build_request("claude-sonnet", "Assess this conversation.");
    assert_eq!(req.model, "claude-sonnet");
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.messages[0].role, "user");
    assert_eq!(req.messages[0].content, "Assess this conversation.");
    assert!(req.max_tokens > 0);
}

#[test]
fn build_request_serializes_expected_shape() {
    let req = build_request("m", "p");
    let value = serde_json::to_value(&req).expect("should serialize");
    assert_eq!(value["model"], "m");
    assert_eq!(value["messages"][0]["role"], "user");
    assert_eq!(value["messages"][0]["content"], "p");
}

#[test]
fn parse_response_joins_text_blocks() {
    let body = json!({
        "content": [
            {"type": "text", "text": "{\"overallRisk\":"},
            {"type": "text", "text": " 0.2}"}
        ],
        "model": "claude-sonnet",
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 10, "output_tokens": 5}
    });
    let text = parse_response(&body.to_string()).expect("should parse");
    assert_eq!(text, "{\"overallRisk\": 0.2}");
}

#[test]
fn parse_response_skips_non_text_blocks() {
    let body = json!({
        "content": [
            {"type": "thinking", "thinking": "hmm"},
            {"type": "text", "text": "verdict"}
        ]
    });
    let text = parse_response(&body.to_string()).expect("should parse");
    assert_eq!(text, "verdict");
}

#[test]
fn parse_response_rejects_garbage() {
    assert!(parse_response("not json at all").is_err());
}
