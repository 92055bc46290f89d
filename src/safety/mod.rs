//! Rule-based conversation safety engine.
//!
//! Layered, leaves first:
//! - [`patterns`] — the declarative [`RiskPattern`](patterns::RiskPattern) table
//! - [`scanner`] — applies the table to a single message
//! - [`conversation`] — aggregate rules invisible at single-message granularity
//! - [`aggregator`] — blends all alerts into one [`SafetyCheck`]
//!
//! Everything here is pure and deterministic: no I/O, no clock reads, no
//! state between calls. The optional LLM second opinion lives in
//! [`crate::ai`] and never changes these results, only accompanies them.

use serde::{Deserialize, Serialize};

pub mod aggregator;
pub mod conversation;
pub mod patterns;
pub mod scanner;

pub use aggregator::analyze_conversation_safety;
pub use patterns::{Category, PatternLibrary, RiskPattern, Severity};

/// A single flagged concern tied to a pattern match or aggregate rule.
///
/// Never mutated after creation. Alerts are collected into lists and are
/// not deduplicated by content; only safety tips are deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAlert {
    /// Unique alert identifier (`{rule}-{uuid}`), fresh on every emission.
    pub id: String,
    /// Stable identifier of the rule that fired, e.g. `financial_request`.
    pub rule: String,
    /// Concern category.
    pub category: Category,
    /// Severity of the concern.
    pub severity: Severity,
    /// Short human-readable title.
    pub title: String,
    /// What the cue usually means.
    pub description: String,
    /// What the user should do about it.
    pub recommendation: String,
    /// How unambiguous the cue is, in `[0, 1]`.
    pub confidence: f64,
    /// Epoch milliseconds of the triggering message (or the newest message
    /// for conversation-level alerts).
    pub timestamp: i64,
    /// The substring that triggered the rule, empty for aggregate rules.
    pub matched: String,
}

/// Aggregate result of a safety analysis.
///
/// Derived fresh on every analysis call, never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyCheck {
    /// `true` iff `risk_level < 0.3` and no high or critical alert fired.
    pub is_safe: bool,
    /// Normalized danger score in `[0, 1]`.
    pub risk_level: f64,
    /// All alerts, sorted by severity descending (stable within a tier).
    pub alerts: Vec<SafetyAlert>,
    /// Deduplicated contextual safety tips.
    pub safety_tips: Vec<String>,
}

impl SafetyCheck {
    /// The defined result for an empty conversation: safe, zero risk.
    pub fn empty() -> Self {
        Self {
            is_safe: true,
            risk_level: 0.0,
            alerts: Vec::new(),
            safety_tips: Vec::new(),
        }
    }
}
