//! Declarative risk-pattern library.
//!
//! Eleven rule-based patterns cover the phrasing cues of common dating-app
//! risks: contact-info harvesting, platform migration, financial requests,
//! love bombing, and pressure tactics. Each rule is a data record, so rules
//! can be unit-tested individually and extended without touching scanner
//! logic. Every matching rule fires; no rule overrides another.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Severity level of a flagged concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth noticing, no action needed.
    Low,
    /// May need attention soon.
    Medium,
    /// Needs attention now.
    High,
    /// Classic scam or danger signature.
    Critical,
}

impl Severity {
    /// Numeric rank for sorting (higher = more severe).
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Fixed weight used when blending alerts into a single risk score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 0.8,
            Self::Critical => 1.0,
        }
    }
}

/// Category of concern a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personal-information exposure.
    Privacy,
    /// Physical or platform safety.
    Safety,
    /// Financial fraud signatures.
    Scam,
    /// Emotional manipulation tactics.
    Manipulation,
}

/// A single declarative risk rule.
///
/// `confidence` is a fixed calibration constant in `[0, 1]` reflecting how
/// unambiguous the cue is: a financial request is almost never innocent
/// (0.95), urgency language often is (0.6).
#[derive(Debug, Clone)]
pub struct RiskPattern {
    /// Stable rule identifier, e.g. `financial_request`.
    pub rule: &'static str,
    /// Compiled case-insensitive expression; fires on a match anywhere in
    /// the message text.
    pub pattern: Regex,
    /// Concern category.
    pub category: Category,
    /// Fixed severity of a hit.
    pub severity: Severity,
    /// Short human-readable title.
    pub title: &'static str,
    /// What the cue usually means.
    pub description: &'static str,
    /// What the user should do about it.
    pub recommendation: &'static str,
    /// Calibration constant in `[0, 1]`.
    pub confidence: f64,
}

/// The compiled pattern library.
///
/// Built once at first use; rules keep their declaration order, though
/// order only affects alert emission order (every matching rule fires).
#[derive(Debug)]
pub struct PatternLibrary {
    rules: Vec<RiskPattern>,
}

impl PatternLibrary {
    /// Compile the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: build_rules(),
        }
    }

    /// The process-wide shared library.
    pub fn standard() -> &'static Self {
        static LIBRARY: std::sync::OnceLock<PatternLibrary> = std::sync::OnceLock::new();
        LIBRARY.get_or_init(Self::new)
    }

    /// All compiled rules in declaration order.
    pub fn rules(&self) -> &[RiskPattern] {
        &self.rules
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule table: (rule, expression, category, severity, title, description,
/// recommendation, confidence).
const RULE_TABLE: &[(
    &str,
    &str,
    Category,
    Severity,
    &str,
    &str,
    &str,
    f64,
)] = &[
    (
        "phone_number_request",
        r"(?i)\b(phone\s*number|your\s+number|call\s+me|text\s+me|give\s+me\s+your\s+digits)\b",
        Category::Privacy,
        Severity::Medium,
        "Phone number exchange",
        "They are asking to move to phone contact early in the conversation.",
        "Keep chatting in the app until you trust this person.",
        0.7,
    ),
    (
        "address_disclosure",
        r"(?i)\b(your\s+address|home\s+address|where\s+do\s+you\s+live|where\s+you\s+live|your\s+place|come\s+over\s+to)\b",
        Category::Privacy,
        Severity::High,
        "Address request",
        "They are probing for where you live before you have met.",
        "Never share your home address with someone you only know online.",
        0.8,
    ),
    (
        "social_media_redirect",
        r"(?i)\b(instagram|insta|snapchat|snap\s*code|kik|facebook|onlyfans)\b|\b(follow|add)\s+me\s+on\b",
        Category::Safety,
        Severity::Low,
        "Social media redirect",
        "They want to connect on social media, which exposes your real profile.",
        "Your social accounts reveal more about you than a dating profile does.",
        0.7,
    ),
    (
        "platform_migration",
        r"(?i)\b(whatsapp|whats\s*app|telegram|signal|viber|wechat)\b|\blet'?s\s+(talk|chat|text)\s+on\b",
        Category::Safety,
        Severity::High,
        "Platform switch attempt",
        "Moving to another messaging app removes the dating platform's protections.",
        "Stay on the platform; scammers move chats off-app before making their ask.",
        0.85,
    ),
    (
        "suspicious_link",
        r"(?i)https?://|\bwww\.|\b(bit\.ly|tinyurl|t\.co)\b|\bclick\s+(this|the|my)\s+link\b",
        Category::Scam,
        Severity::High,
        "Suspicious link",
        "Links in early conversations commonly lead to phishing or paid sites.",
        "Do not open links from people you have not met.",
        0.8,
    ),
    (
        "financial_request",
        r"(?i)\b(send\s+(me\s+)?money|need\s+money|lend\s+me|loan\s+me|gift\s*cards?|western\s+union|moneygram|wire\s+(me|transfer)|bank\s+(details|account)|bitcoin|crypto(currency)?|paypal|venmo|cash\s*app|financial\s+(help|emergency|trouble)|pay\s+for\s+my)\b",
        Category::Scam,
        Severity::Critical,
        "Financial request",
        "Any request for money, cards, or banking details from an online-only contact is the core romance-scam move.",
        "Never send money or financial information to someone you have only met online, whatever the story.",
        0.95,
    ),
    (
        "love_bombing",
        r"(?i)\b(love\s+you|soul\s*mate|meant\s+to\s+be|destiny|never\s+felt\s+(like\s+)?this|love\s+at\s+first\s+sight|you'?re\s+perfect|my\s+future\s+(wife|husband))\b",
        Category::Manipulation,
        Severity::Medium,
        "Love bombing",
        "Intense declarations of love very early are a grooming technique, not a compliment.",
        "Healthy connections build gradually; be wary of instant devotion.",
        0.65,
    ),
    (
        "invasive_questions",
        r"(?i)\b(are\s+you\s+(home\s+)?alone|live\s+alone|home\s+alone|work\s+schedule|what\s+time\s+do\s+you\s+(work|leave|get\s+home))\b",
        Category::Safety,
        Severity::High,
        "Invasive personal questions",
        "Questions about being alone or your daily schedule map your vulnerability.",
        "Keep your routine and living situation private until you have met safely.",
        0.8,
    ),
    (
        "photo_verification",
        r"(?i)\b(send\s+(me\s+)?(a\s+)?(pic|pics|photo|photos|selfie)|prove\s+(you'?re|it'?s)\s+(real|really\s+you)|verify\s+yourself)\b",
        Category::Privacy,
        Severity::Medium,
        "Photo demand",
        "Demands for photos can feed verification scams or later pressure.",
        "You never owe anyone photos; verified video calls are safer proof.",
        0.7,
    ),
    (
        "urgency_pressure",
        r"(?i)\b(right\s+now|immediately|urgent(ly)?|hurry|asap|act\s+now|before\s+it'?s\s+too\s+late|running\s+out\s+of\s+time|last\s+chance)\b",
        Category::Manipulation,
        Severity::Medium,
        "Urgency pressure",
        "Artificial time pressure short-circuits careful thinking.",
        "Anything that cannot wait a day is not your problem to solve.",
        0.6,
    ),
    (
        "immediate_meeting",
        r"(?i)\b(meet\s+(me\s+)?(tonight|today|right\s+now|now)|come\s+over\s+(tonight|now)|my\s+place\s+tonight)\b",
        Category::Safety,
        Severity::High,
        "Immediate meeting push",
        "Pushing for a same-day, private meeting skips every safety step.",
        "First meetings belong in public places, planned in advance.",
        0.75,
    ),
];

fn build_rules() -> Vec<RiskPattern> {
    RULE_TABLE
        .iter()
        .filter_map(
            |&(rule, pattern, category, severity, title, description, recommendation, confidence)| {
                Regex::new(pattern).ok().map(|compiled| RiskPattern {
                    rule,
                    pattern: compiled,
                    category,
                    severity,
                    title,
                    description,
                    recommendation,
                    confidence,
                })
            },
        )
        .collect()
}
