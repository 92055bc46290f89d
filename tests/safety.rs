#![allow(missing_docs)]
// End-to-end tests for the pattern-based safety pipeline.

use chaperone::safety::patterns::{Category, Severity};
use chaperone::safety::{analyze_conversation_safety, SafetyCheck};
use chaperone::types::Message;

const HOUR_MS: i64 = 60 * 60 * 1000;

fn hours(n: i64) -> i64 {
    n.saturating_mul(HOUR_MS)
}

// ── Fixtures ──

fn scam_conversation() -> Vec<Message> {
    vec![
        Message::from_contact("hey beautiful, you're my soulmate, never felt like this", 0),
        Message::from_user("haha that's fast", hours(1)),
        Message::from_contact("let's move to whatsapp, this app is limited", hours(2)),
        Message::from_contact("are you on telegram maybe?", hours(3)),
        Message::from_contact(
            "my wallet was stolen, can you send me money for an emergency",
            hours(4),
        ),
    ]
}

fn friendly_conversation() -> Vec<Message> {
    vec![
        Message::from_user("hey! loved your hiking photos", 0),
        Message::from_contact("thanks! that trail was amazing, do you hike too?", hours(1)),
        Message::from_user("every weekend I can", hours(2)),
        Message::from_contact("we should compare favorite trails sometime", hours(3)),
    ]
}

// ── Empty input ──

#[test]
fn empty_conversation_is_safe_with_zero_risk() {
    let check = analyze_conversation_safety(&[]);
    assert!(check.is_safe);
    assert!((check.risk_level - 0.0).abs() < f64::EPSILON);
    assert!(check.alerts.is_empty());
}

// ── Scanner properties ──

#[test]
fn financial_cue_produces_critical_scam_alert() {
    let messages = vec![Message::from_contact(
        "can you send me money for an emergency",
        0,
    )];
    let check = analyze_conversation_safety(&messages);
    let alert = check
        .alerts
        .iter()
        .find(|a| a.rule == "financial_request")
        .expect("financial alert must fire");
    assert_eq!(alert.severity, Severity::Critical);
    assert_eq!(alert.category, Category::Scam);
    assert!((alert.confidence - 0.95).abs() < f64::EPSILON);
    assert!(!check.is_safe);
}

#[test]
fn friendly_conversation_is_safe() {
    let check = analyze_conversation_safety(&friendly_conversation());
    assert!(check.is_safe, "alerts: {:?}", check.alerts);
    assert!(check.risk_level < 0.3);
}

// ── Conversation-level properties ──

#[test]
fn repeated_platform_mentions_fire_exactly_one_persistent_alert() {
    let messages = vec![
        Message::from_contact("add me on whatsapp", 0),
        Message::from_user("I'd rather stay here", hours(1)),
        Message::from_contact("telegram works too if you prefer", hours(2)),
    ];
    let check = analyze_conversation_safety(&messages);
    let persistent: Vec<_> = check
        .alerts
        .iter()
        .filter(|a| a.rule == "persistent_platform_switch")
        .collect();
    assert_eq!(persistent.len(), 1);
    assert_eq!(persistent[0].severity, Severity::High);
    assert_eq!(persistent[0].category, Category::Safety);
}

#[test]
fn rapid_personal_probing_fires_privacy_alert() {
    let messages = vec![
        Message::from_contact("what's your phone number?", 0),
        Message::from_contact("which part of town do you live in?", hours(1)),
        Message::from_contact("do you live alone?", hours(2)),
    ];
    let check = analyze_conversation_safety(&messages);
    assert!(check
        .alerts
        .iter()
        .any(|a| a.rule == "rapid_personal_info" && a.severity == Severity::High));
}

// ── Aggregation properties ──

#[test]
fn any_high_alert_makes_conversation_unsafe() {
    let messages = vec![Message::from_contact("so what's your home address?", 0)];
    let check = analyze_conversation_safety(&messages);
    assert!(check
        .alerts
        .iter()
        .any(|a| matches!(a.severity, Severity::High | Severity::Critical)));
    assert!(!check.is_safe);
}

#[test]
fn alerts_are_sorted_critical_first() {
    let check = analyze_conversation_safety(&scam_conversation());
    assert!(!check.alerts.is_empty());
    assert_eq!(check.alerts[0].severity, Severity::Critical);
    for pair in check.alerts.windows(2) {
        assert!(pair[0].severity.rank() >= pair[1].severity.rank());
    }
}

#[test]
fn risk_level_stays_in_unit_range() {
    let check = analyze_conversation_safety(&scam_conversation());
    assert!((0.0..=1.0).contains(&check.risk_level));
    assert!(check.risk_level > 0.3, "scam fixture should score high");
}

#[test]
fn scam_conversation_gets_general_tips() {
    let check = analyze_conversation_safety(&scam_conversation());
    assert!(check.safety_tips.iter().any(|t| t.contains("video call")));
    let mut sorted = check.safety_tips.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), check.safety_tips.len(), "tips must be unique");
}

// ── Determinism ──

fn comparable(check: &SafetyCheck) -> (bool, f64, Vec<(String, i64, String)>, Vec<String>) {
    (
        check.is_safe,
        check.risk_level,
        check
            .alerts
            .iter()
            .map(|a| (a.rule.clone(), a.timestamp, a.matched.clone()))
            .collect(),
        check.safety_tips.clone(),
    )
}

#[test]
fn analysis_is_idempotent_up_to_alert_ids() {
    let messages = scam_conversation();
    let first = analyze_conversation_safety(&messages);
    let second = analyze_conversation_safety(&messages);
    assert_eq!(comparable(&first), comparable(&second));
    // Fresh ids every emission.
    assert_ne!(first.alerts[0].id, second.alerts[0].id);
}

#[test]
fn safety_check_serializes_to_json() {
    let check = analyze_conversation_safety(&scam_conversation());
    let json = serde_json::to_string(&check).expect("should serialize");
    let back: SafetyCheck = serde_json::from_str(&json).expect("should deserialize");
    assert_eq!(back.alerts.len(), check.alerts.len());
}
