//! Conversation-level pattern analysis.
//!
//! Two aggregate rules catch behavior no single message reveals: personal
//! information being collected too fast, and repeated pressure to leave
//! the platform. The thresholds are exact alerting boundaries, not
//! tunables.

use regex::Regex;
use uuid::Uuid;

use crate::types::{Message, Sender};

use super::patterns::{Category, Severity};
use super::SafetyAlert;

/// More than this many personal-info requests inside the window fires the
/// rapid-disclosure rule.
const RAPID_DISCLOSURE_MESSAGES: usize = 2;

/// Window for the rapid-disclosure rule, measured from the first
/// contact-authored message to the newest message in the history.
const RAPID_DISCLOSURE_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// More than this many platform references fires the persistent-pressure rule.
const PLATFORM_PRESSURE_MESSAGES: usize = 1;

/// Personal-information cue. Deliberately a bare alternation: the rule is
/// a coarse rate signal, not a precise matcher.
const PERSONAL_INFO_EXPR: &str = r"(?i)phone|number|address|live|work|schedule|home|alone";

/// Messaging-platform reference cue.
const PLATFORM_EXPR: &str =
    r"(?i)whatsapp|telegram|signal|kik|viber|wechat|switch to|move to|text me on";

/// Analyze the full ordered history for aggregate risk patterns.
///
/// Returns zero or more alerts; an empty or all-user history returns an
/// empty list. Only contact-authored messages are counted.
pub fn analyze_history(messages: &[Message]) -> Vec<SafetyAlert> {
    let mut alerts = Vec::new();

    let contact_messages: Vec<&Message> = messages
        .iter()
        .filter(|m| m.sender == Sender::Contact)
        .collect();

    if contact_messages.is_empty() {
        return alerts;
    }

    let newest_timestamp = messages.iter().map(|m| m.timestamp).max().unwrap_or(0);

    if let Some(alert) = check_rapid_disclosure(&contact_messages, newest_timestamp) {
        alerts.push(alert);
    }

    if let Some(alert) = check_platform_pressure(&contact_messages, newest_timestamp) {
        alerts.push(alert);
    }

    alerts
}

/// Fire when more than [`RAPID_DISCLOSURE_MESSAGES`] contact messages probe
/// for personal information within [`RAPID_DISCLOSURE_WINDOW_MS`] of the
/// first contact message.
fn check_rapid_disclosure(
    contact_messages: &[&Message],
    newest_timestamp: i64,
) -> Option<SafetyAlert> {
    let expr = Regex::new(PERSONAL_INFO_EXPR).ok()?;

    let probing = contact_messages
        .iter()
        .filter(|m| expr.is_match(&m.text))
        .count();

    if probing <= RAPID_DISCLOSURE_MESSAGES {
        return None;
    }

    let first_contact_ts = contact_messages.first()?.timestamp;
    let elapsed = newest_timestamp.saturating_sub(first_contact_ts);
    if elapsed >= RAPID_DISCLOSURE_WINDOW_MS {
        return None;
    }

    Some(SafetyAlert {
        id: format!("rapid_personal_info-{}", Uuid::new_v4()),
        rule: "rapid_personal_info".to_owned(),
        category: Category::Privacy,
        severity: Severity::High,
        title: "Rapid personal information gathering".to_owned(),
        description: format!(
            "{probing} messages asked about personal details within the first day of chatting."
        ),
        recommendation: "Slow down and keep identifying details private until you have met."
            .to_owned(),
        confidence: 0.8,
        timestamp: newest_timestamp,
        matched: String::new(),
    })
}

/// Fire when more than [`PLATFORM_PRESSURE_MESSAGES`] contact messages
/// reference moving to another messaging platform.
fn check_platform_pressure(
    contact_messages: &[&Message],
    newest_timestamp: i64,
) -> Option<SafetyAlert> {
    let expr = Regex::new(PLATFORM_EXPR).ok()?;

    let references = contact_messages
        .iter()
        .filter(|m| expr.is_match(&m.text))
        .count();

    if references <= PLATFORM_PRESSURE_MESSAGES {
        return None;
    }

    Some(SafetyAlert {
        id: format!("persistent_platform_switch-{}", Uuid::new_v4()),
        rule: "persistent_platform_switch".to_owned(),
        category: Category::Safety,
        severity: Severity::High,
        title: "Persistent platform switch pressure".to_owned(),
        description: format!(
            "{references} messages pushed to move the conversation to another app."
        ),
        recommendation: "Repeated pressure to leave the platform is a strong scam signal; stay put."
            .to_owned(),
        confidence: 0.85,
        timestamp: newest_timestamp,
        matched: String::new(),
    })
}
