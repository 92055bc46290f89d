//! Risk aggregation: per-message and conversation-level alerts blended
//! into one score, one verdict, and a deduplicated set of safety tips.

use crate::types::{Message, Sender};

use super::conversation;
use super::patterns::{Category, PatternLibrary, Severity};
use super::scanner;
use super::{SafetyAlert, SafetyCheck};

/// Risk level at or above which a conversation can no longer be safe.
const SAFE_RISK_THRESHOLD: f64 = 0.3;

/// Number of high-severity alerts that triggers the general tips.
const HIGH_ALERT_TIP_THRESHOLD: usize = 2;

/// Run the full pattern pipeline over a conversation.
///
/// Scans every contact-authored message, runs the conversation-level
/// analyzer once, and aggregates. Empty input produces the defined
/// empty result ([`SafetyCheck::empty`]); nothing here can fail.
pub fn analyze_conversation_safety(messages: &[Message]) -> SafetyCheck {
    if messages.is_empty() {
        return SafetyCheck::empty();
    }

    let library = PatternLibrary::standard();

    let mut alerts: Vec<SafetyAlert> = messages
        .iter()
        .filter(|m| m.sender == Sender::Contact)
        .flat_map(|m| scanner::scan_message(&m.text, m.timestamp, library))
        .collect();

    alerts.extend(conversation::analyze_history(messages));

    let risk_level = risk_level(&alerts);
    let has_severe = alerts
        .iter()
        .any(|a| matches!(a.severity, Severity::High | Severity::Critical));
    let is_safe = risk_level < SAFE_RISK_THRESHOLD && !has_severe;

    // Stable sort keeps emission order within a severity tier.
    alerts.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));

    let safety_tips = safety_tips(&alerts);

    tracing::debug!(
        alerts = alerts.len(),
        risk_level,
        is_safe,
        "safety analysis complete"
    );

    SafetyCheck {
        is_safe,
        risk_level,
        alerts,
        safety_tips,
    }
}

/// Mean of `weight(severity) × confidence` over all alerts, clamped to
/// `[0, 1]`. Zero when there are no alerts.
fn risk_level(alerts: &[SafetyAlert]) -> f64 {
    if alerts.is_empty() {
        return 0.0;
    }
    let sum: f64 = alerts
        .iter()
        .map(|a| a.severity.weight() * a.confidence)
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / alerts.len() as f64;
    mean.clamp(0.0, 1.0)
}

/// Select tips by which categories are present, deduplicated, plus the
/// general tips when the alert set is high-severity-heavy (two or more
/// `high` alerts, or any `critical`).
fn safety_tips(alerts: &[SafetyAlert]) -> Vec<String> {
    let mut tips: Vec<String> = Vec::new();

    let push_unique = |tip: &str, tips: &mut Vec<String>| {
        if !tips.iter().any(|t| t == tip) {
            tips.push(tip.to_owned());
        }
    };

    for alert in alerts {
        let tip = match alert.category {
            Category::Privacy => {
                "Avoid sharing personal details like your number, address, or routine until you have met in person."
            }
            Category::Safety => {
                "Keep the conversation on the dating platform; its reporting and blocking tools only work there."
            }
            Category::Scam => {
                "Never send money, gift cards, or financial details to someone you have only met online."
            }
            Category::Manipulation => {
                "Healthy connections grow at a comfortable pace; be wary of intensity or pressure this early."
            }
        };
        push_unique(tip, &mut tips);
    }

    let high_count = alerts
        .iter()
        .filter(|a| a.severity == Severity::High)
        .count();
    let any_critical = alerts.iter().any(|a| a.severity == Severity::Critical);

    if high_count >= HIGH_ALERT_TIP_THRESHOLD || any_critical {
        push_unique(
            "Consider a video call before investing more in this connection.",
            &mut tips,
        );
        push_unique(
            "If you do meet, pick a public place and tell a friend where you are going.",
            &mut tips,
        );
    }

    tips
}
