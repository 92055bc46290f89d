//! LLM second opinion for conversation safety.
//!
//! Builds a structured prompt, asks the configured [`TextGenerator`] for a
//! strict JSON verdict, and folds the result into the pattern engine's
//! score with a pessimistic `max()`. Transport errors, non-JSON output,
//! and out-of-range numbers all degrade to a deterministic keyword
//! heuristic. A failed model call never reaches the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::providers::TextGenerator;
use crate::safety::{analyze_conversation_safety, SafetyCheck};
use crate::types::{Message, Sender};

/// Maximum character length for the transcript section of the prompt.
const MAX_TRANSCRIPT_CHARS: usize = 8000;

/// Fixed risk-keyword list for the fallback heuristic.
const RISK_KEYWORDS: &[&str] = &[
    "money",
    "cash",
    "wire",
    "gift card",
    "bank",
    "bitcoin",
    "crypto",
    "invest",
    "loan",
    "inheritance",
    "whatsapp",
    "telegram",
    "urgent",
    "emergency",
    "secret",
    "alone",
    "address",
    "password",
    "verify",
    "customs",
];

/// Fixed safe-keyword list for the fallback heuristic.
const SAFE_KEYWORDS: &[&str] = &[
    "coffee",
    "movie",
    "hobby",
    "friends",
    "family",
    "work",
    "weekend",
    "funny",
    "haha",
    "lol",
    "music",
    "travel",
    "food",
    "game",
    "book",
];

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The model's (or fallback's) safety assessment.
///
/// All numeric fields are clamped on construction: `overall_risk` to
/// `[0, 1]`, `trust_score` to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSafetyAnalysis {
    /// Overall risk in `[0, 1]`.
    pub overall_risk: f64,
    /// Specific concerns the model raised.
    pub concerns: Vec<String>,
    /// Recommended actions.
    pub recommendations: Vec<String>,
    /// Red flags observed in the conversation.
    pub red_flags: Vec<String>,
    /// Positive signals observed in the conversation.
    pub positive_signals: Vec<String>,
    /// Trust score in `[0, 100]`.
    pub trust_score: f64,
}

/// Combined safety report: pattern engine result plus the AI opinion.
///
/// `ai` being absent signals degradation, not failure; the pattern
/// analysis inside is always complete and valid on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// The deterministic pattern analysis.
    pub pattern_analysis: SafetyCheck,
    /// The AI (or keyword-fallback) assessment, when available.
    pub ai: Option<AiSafetyAnalysis>,
    /// `max(pattern risk, ai risk)`, in `[0, 1]`.
    pub combined_risk: f64,
}

impl From<SafetyCheck> for SafetyReport {
    /// Wrap a pattern-only result; combined risk is the pattern risk.
    fn from(check: SafetyCheck) -> Self {
        let combined_risk = check.risk_level;
        Self {
            pattern_analysis: check,
            ai: None,
            combined_risk,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw wire shape (model output before validation)
// ---------------------------------------------------------------------------

/// Untrusted model output; every field defaults so partial JSON still
/// yields a usable record.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAnalysis {
    overall_risk: f64,
    concerns: Vec<String>,
    recommendations: Vec<String>,
    red_flags: Vec<String>,
    positive_signals: Vec<String>,
    trust_score: f64,
}

impl From<RawAnalysis> for AiSafetyAnalysis {
    fn from(raw: RawAnalysis) -> Self {
        Self {
            overall_risk: clamp_unit(raw.overall_risk),
            concerns: raw.concerns,
            recommendations: raw.recommendations,
            red_flags: raw.red_flags,
            positive_signals: raw.positive_signals,
            trust_score: raw.trust_score.clamp(0.0, 100.0),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Analyze a conversation with the pattern engine plus an LLM second
/// opinion.
///
/// Infallible by design: a failed or unparsable model call downgrades to
/// [`fallback_analysis`] and the pipeline proceeds. The pattern analysis
/// in the returned report is identical to what
/// [`analyze_conversation_safety`] alone would produce.
pub async fn analyze_conversation_with_ai(
    messages: &[Message],
    generator: &dyn TextGenerator,
) -> SafetyReport {
    let pattern_analysis = analyze_conversation_safety(messages);

    let ai = match generator.generate(&build_safety_prompt(messages)).await {
        Ok(text) => match parse_analysis(&text) {
            Some(parsed) => {
                debug!(model = generator.model_id(), "ai analysis parsed");
                parsed
            }
            None => {
                warn!(
                    model = generator.model_id(),
                    "ai response was not valid JSON, using keyword fallback"
                );
                fallback_analysis(messages)
            }
        },
        Err(e) => {
            warn!(
                model = generator.model_id(),
                error = %e,
                "ai call failed, using keyword fallback"
            );
            fallback_analysis(messages)
        }
    };

    let combined_risk = pattern_analysis.risk_level.max(ai.overall_risk).clamp(0.0, 1.0);

    SafetyReport {
        pattern_analysis,
        ai: Some(ai),
        combined_risk,
    }
}

// ---------------------------------------------------------------------------
// Prompt building
// ---------------------------------------------------------------------------

/// Build the co-analyzer prompt: instructions, strict output schema, and
/// the transcript (truncated to a reasonable size).
pub fn build_safety_prompt(messages: &[Message]) -> String {
    let mut transcript = String::with_capacity(MAX_TRANSCRIPT_CHARS);
    for message in messages {
        let who = match message.sender {
            Sender::User => "user",
            Sender::Contact => "match",
        };
        transcript.push_str(&format!("{who}: {}\n", message.text));
        if transcript.len() > MAX_TRANSCRIPT_CHARS {
            transcript.truncate(MAX_TRANSCRIPT_CHARS);
            transcript.push_str("\n...[truncated]");
            break;
        }
    }

    format!(
        "You are a dating-safety analyst. Assess the following conversation for \
         romance-scam, manipulation, and personal-safety risk.\n\
         \n\
         Respond with a JSON object:\n\
         {{\n\
           \"overallRisk\": 0.0 to 1.0,\n\
           \"concerns\": [\"...\"],\n\
           \"recommendations\": [\"...\"],\n\
           \"redFlags\": [\"...\"],\n\
           \"positiveSignals\": [\"...\"],\n\
           \"trustScore\": 0 to 100\n\
         }}\n\
         \n\
         Output ONLY the JSON object, no other text.\n\
         \n\
         ## Conversation\n\
         {transcript}"
    )
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse the model's reply into a validated analysis.
///
/// Strips markdown code fences and any leading/trailing non-JSON text,
/// then parses into the typed shape with clamped defaults. Returns `None`
/// when no JSON object can be recovered.
pub fn parse_analysis(text: &str) -> Option<AiSafetyAnalysis> {
    let json_text = extract_json(text)?;

    match serde_json::from_str::<RawAnalysis>(json_text) {
        Ok(raw) => Some(raw.into()),
        Err(e) => {
            warn!(
                error = %e,
                text_preview = &text[..text.len().min(200)],
                "failed to parse ai analysis JSON"
            );
            None
        }
    }
}

/// Cut the `{...}` span out of a reply that may wrap it in code fences or
/// surrounding prose.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

// ---------------------------------------------------------------------------
// Keyword fallback
// ---------------------------------------------------------------------------

/// Deterministic keyword-counting fallback for when the model call is
/// degraded.
///
/// Counts fixed risk and safe keywords across the concatenated message
/// text; `overall_risk = min(risk/10, 1)` and
/// `trust_score = clamp(100 − risk·10 + safe·5, 0, 100)`.
pub fn fallback_analysis(messages: &[Message]) -> AiSafetyAnalysis {
    let combined = messages
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let matched_risk: Vec<&str> = RISK_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| combined.contains(kw))
        .collect();
    let matched_safe: Vec<&str> = SAFE_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| combined.contains(kw))
        .collect();

    let risk_matches: usize = matched_risk
        .iter()
        .map(|kw| combined.matches(kw).count())
        .fold(0, usize::saturating_add);
    let safe_matches: usize = matched_safe
        .iter()
        .map(|kw| combined.matches(kw).count())
        .fold(0, usize::saturating_add);

    #[allow(clippy::cast_precision_loss)]
    let overall_risk = (risk_matches as f64 / 10.0).min(1.0);
    #[allow(clippy::cast_precision_loss)]
    let trust_score =
        (100.0 - risk_matches as f64 * 10.0 + safe_matches as f64 * 5.0).clamp(0.0, 100.0);

    AiSafetyAnalysis {
        overall_risk,
        concerns: if matched_risk.is_empty() {
            Vec::new()
        } else {
            vec!["Conversation contains language commonly seen in romance scams.".to_owned()]
        },
        recommendations: vec![
            "Automated keyword screening only; verify independently before trusting.".to_owned(),
        ],
        red_flags: matched_risk.iter().map(|s| (*s).to_owned()).collect(),
        positive_signals: matched_safe.iter().map(|s| (*s).to_owned()).collect(),
        trust_score,
    }
}
