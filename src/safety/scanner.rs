//! Single-message risk scanner.
//!
//! Applies the pattern library to one message's text. Pure function of
//! (text, timestamp, library): no state is retained between calls and
//! empty input produces an empty list.

use uuid::Uuid;

use super::patterns::PatternLibrary;
use super::SafetyAlert;

/// Scan one message against every rule in the library.
///
/// Returns one [`SafetyAlert`] per rule whose expression matches anywhere
/// in the text (rules are case-insensitive). All matching rules fire
/// independently; a single message can produce several alerts.
pub fn scan_message(text: &str, timestamp: i64, library: &PatternLibrary) -> Vec<SafetyAlert> {
    if text.is_empty() {
        return Vec::new();
    }

    library
        .rules()
        .iter()
        .filter_map(|rule| {
            rule.pattern.find(text).map(|hit| SafetyAlert {
                id: format!("{}-{}", rule.rule, Uuid::new_v4()),
                rule: rule.rule.to_owned(),
                category: rule.category,
                severity: rule.severity,
                title: rule.title.to_owned(),
                description: rule.description.to_owned(),
                recommendation: rule.recommendation.to_owned(),
                confidence: rule.confidence,
                timestamp,
                matched: hit.as_str().to_owned(),
            })
        })
        .collect()
}
