//! OpenAI-compatible wire format tests.

use chaperone::providers::openai::{build_request, parse_response};
use serde_json::json;

#[test]
fn build_request_sets_model_and_prompt() {
    let req = build_request("gpt-4o", "Assess this conversation.");
    assert_eq!(req.model, "gpt-4o");
    assert_eq!(req.messages[0].role, "user");
    assert_eq!(
        req.messages[0].content.as_deref(),
        Some("Assess this conversation.")
    );
}

#[test]
fn parse_response_takes_first_choice() {
    let body = json!({
        "choices": [
            {"message": {"role": "assistant", "content": "first"}},
            {"message": {"role": "assistant", "content": "second"}}
        ]
    });
    let text = parse_response(&body.to_string()).expect("should parse");
    assert_eq!(text, "first");
}

#[test]
fn parse_response_tolerates_null_content() {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": null}}]
    });
    let text = parse_response(&body.to_string()).expect("should parse");
    assert_eq!(text, "");
}

#[test]
fn parse_response_errors_on_empty_choices() {
    let body = json!({"choices": []});
    assert!(parse_response(&body.to_string()).is_err());
}
