//! Interest/engagement scoring, independent of the safety engine.
//!
//! Takes a free-text transcript, splits it into turns by speaker prefix,
//! and scores how engaged the other person is from message length,
//! question rate, sentiment, and enthusiasm cues. Same pattern-matching
//! paradigm as the safety engine, entirely separate signal.

use serde::{Deserialize, Serialize};

pub mod lexicon;

/// Placeholder neutral score for response time; transcripts carry no
/// timestamps to derive a real one from.
const RESPONSE_TIME_NEUTRAL: u8 = 60;

/// Component weights: response time, message length, questions,
/// sentiment, enthusiasm.
const WEIGHTS: [f64; 5] = [0.15, 0.25, 0.25, 0.20, 0.15];

/// Speaker-prefix tokens that mark a line as the user's own.
const USER_TOKENS: &[&str] = &["me", "i", "you", "user", "myself"];

/// Which side of the conversation a transcript turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The person asking for the analysis.
    User,
    /// The other person.
    Other,
}

/// One parsed transcript turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Who said it.
    pub speaker: Speaker,
    /// The line with any speaker prefix removed.
    pub text: String,
}

/// Raw engagement measurements backing the component scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    /// Number of user turns.
    pub user_messages: usize,
    /// Number of other-party turns.
    pub contact_messages: usize,
    /// Mean user message length in characters.
    pub avg_user_length: f64,
    /// Mean other-party message length in characters.
    pub avg_contact_length: f64,
    /// Percentage (0–100) of other-party messages containing a question.
    pub question_rate: f64,
    /// Fraction (0–1) of other-party messages containing an emoji.
    pub emoji_ratio: f64,
    /// Flirtatious keyword occurrences in other-party messages.
    pub flirty_words: usize,
    /// Lexical sentiment score of other-party messages.
    pub sentiment: f64,
}

/// The five component scores, each 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Response-time score (fixed neutral placeholder).
    pub response_time: u8,
    /// Message-length ratio score.
    pub message_length: u8,
    /// Question-asking rate score.
    pub questions: u8,
    /// Sentiment score.
    pub sentiment: u8,
    /// Emoji/flirt enthusiasm score.
    pub enthusiasm: u8,
}

/// Named interest level derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    /// Overall score ≥ 70.
    HighInterest,
    /// Overall score ≥ 40.
    MixedSignals,
    /// Everything below.
    LowInterest,
    /// The transcript had no other-party messages to score.
    NoData,
}

impl InterestLevel {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::HighInterest => "High Interest",
            Self::MixedSignals => "Mixed Signals",
            Self::LowInterest => "Low Interest",
            Self::NoData => "No Data",
        }
    }
}

/// Full result of an interest analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestAnalysis {
    /// Weighted overall score, 0–100.
    pub overall_score: u8,
    /// Named level for the overall score.
    pub level: InterestLevel,
    /// The five component scores.
    pub scores: ComponentScores,
    /// Raw measurements behind the scores.
    pub engagement: EngagementMetrics,
}

impl InterestAnalysis {
    /// Defined default for a transcript with no other-party messages.
    fn no_data(user_messages: usize, avg_user_length: f64) -> Self {
        Self {
            overall_score: 0,
            level: InterestLevel::NoData,
            scores: ComponentScores {
                response_time: RESPONSE_TIME_NEUTRAL,
                message_length: 0,
                questions: 0,
                sentiment: 0,
                enthusiasm: 0,
            },
            engagement: EngagementMetrics {
                user_messages,
                contact_messages: 0,
                avg_user_length,
                avg_contact_length: 0.0,
                question_rate: 0.0,
                emoji_ratio: 0.0,
                flirty_words: 0,
                sentiment: 0.0,
            },
        }
    }
}

/// Score how interested the other person appears from a free-text
/// transcript.
///
/// Tolerates anything: unknown prefixes, blank lines, and empty input all
/// produce defined results rather than errors.
pub fn analyze_interest(transcript: &str) -> InterestAnalysis {
    let turns = split_transcript(transcript);

    let user_texts: Vec<&str> = turns
        .iter()
        .filter(|t| t.speaker == Speaker::User)
        .map(|t| t.text.as_str())
        .collect();
    let contact_texts: Vec<&str> = turns
        .iter()
        .filter(|t| t.speaker == Speaker::Other)
        .map(|t| t.text.as_str())
        .collect();

    let avg_user_length = mean_length(&user_texts);

    if contact_texts.is_empty() {
        return InterestAnalysis::no_data(user_texts.len(), avg_user_length);
    }

    let avg_contact_length = mean_length(&contact_texts);

    // Message-length ratio: does the other side put in at least as much
    // text as the user?
    let length_ratio = if avg_user_length > 0.0 {
        avg_contact_length / avg_user_length
    } else {
        avg_contact_length
    };
    let message_length = bucket(length_ratio, &[(1.2, 90), (0.8, 70), (0.5, 50)], 20);

    // Question-asking rate.
    let questions_asked = contact_texts.iter().filter(|t| t.contains('?')).count();
    let question_fraction = fraction(questions_asked, contact_texts.len());
    let questions = bucket(question_fraction, &[(0.4, 90), (0.2, 70), (0.1, 50)], 20);

    // Sentiment of the other side's messages.
    let sentiment_raw = lexicon::sentiment_score(&contact_texts);
    let sentiment = bucket(sentiment_raw, &[(2.0, 90), (0.5, 70), (-1.0, 50)], 20);

    // Enthusiasm: emoji usage and flirtatious language.
    let emoji_messages = contact_texts
        .iter()
        .filter(|t| lexicon::contains_emoji(t))
        .count();
    let emoji_ratio = fraction(emoji_messages, contact_texts.len());
    let flirty_words = contact_texts
        .iter()
        .map(|t| lexicon::flirty_word_count(t))
        .fold(0, usize::saturating_add);
    let enthusiasm = if emoji_ratio >= 0.6 || flirty_words >= 3 {
        90
    } else if emoji_ratio >= 0.3 || flirty_words >= 2 {
        70
    } else if emoji_ratio >= 0.1 || flirty_words >= 1 {
        50
    } else {
        30
    };

    let scores = ComponentScores {
        response_time: RESPONSE_TIME_NEUTRAL,
        message_length,
        questions,
        sentiment,
        enthusiasm,
    };

    let weighted = f64::from(scores.response_time) * WEIGHTS[0]
        + f64::from(scores.message_length) * WEIGHTS[1]
        + f64::from(scores.questions) * WEIGHTS[2]
        + f64::from(scores.sentiment) * WEIGHTS[3]
        + f64::from(scores.enthusiasm) * WEIGHTS[4];
    let overall_score = to_score(weighted);

    let level = if overall_score >= 70 {
        InterestLevel::HighInterest
    } else if overall_score >= 40 {
        InterestLevel::MixedSignals
    } else {
        InterestLevel::LowInterest
    };

    InterestAnalysis {
        overall_score,
        level,
        scores,
        engagement: EngagementMetrics {
            user_messages: user_texts.len(),
            contact_messages: contact_texts.len(),
            avg_user_length,
            avg_contact_length,
            question_rate: question_fraction * 100.0,
            emoji_ratio,
            flirty_words,
            sentiment: sentiment_raw,
        },
    }
}

/// Split a free-text transcript into speaker turns.
///
/// A line starting with `token:` is assigned by token: first-person
/// tokens (`me:`, `you:`, `user:`) to the user, any other token to the
/// other party. Unlabeled lines alternate strictly, starting with the
/// user. `http:`/`https:` are not speaker tokens.
pub fn split_transcript(transcript: &str) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut next_unlabeled = Speaker::User;

    for line in transcript.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some((speaker, rest)) = parse_prefix(trimmed) {
            turns.push(Turn {
                speaker,
                text: rest.trim().to_owned(),
            });
        } else {
            let speaker = next_unlabeled;
            next_unlabeled = match speaker {
                Speaker::User => Speaker::Other,
                Speaker::Other => Speaker::User,
            };
            turns.push(Turn {
                speaker,
                text: trimmed.to_owned(),
            });
        }
    }

    turns
}

/// Recognize a `token:` speaker prefix at the start of a line.
fn parse_prefix(line: &str) -> Option<(Speaker, &str)> {
    let (token, rest) = line.split_once(':')?;
    let token = token.trim();

    if token.is_empty()
        || token.len() > 12
        || !token.chars().all(char::is_alphabetic)
        || token.eq_ignore_ascii_case("http")
        || token.eq_ignore_ascii_case("https")
    {
        return None;
    }

    let lower = token.to_lowercase();
    let speaker = if USER_TOKENS.contains(&lower.as_str()) {
        Speaker::User
    } else {
        Speaker::Other
    };
    Some((speaker, rest))
}

fn mean_length(texts: &[&str]) -> f64 {
    if texts.is_empty() {
        return 0.0;
    }
    let total: usize = texts
        .iter()
        .map(|t| t.chars().count())
        .fold(0, usize::saturating_add);
    #[allow(clippy::cast_precision_loss)]
    let mean = total as f64 / texts.len() as f64;
    mean
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let f = part as f64 / whole as f64;
    f
}

/// Map a value onto descending `(threshold, score)` buckets.
fn bucket(value: f64, thresholds: &[(f64, u8)], floor: u8) -> u8 {
    for &(threshold, score) in thresholds {
        if value >= threshold {
            return score;
        }
    }
    floor
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
