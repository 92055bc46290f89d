//! Word and emoji lexicons for engagement scoring.

/// Words counted as positive sentiment.
const POSITIVE_WORDS: &[&str] = &[
    "love", "great", "awesome", "amazing", "fun", "happy", "excited", "nice", "cool", "sweet",
    "good", "best", "wonderful", "beautiful", "perfect", "haha", "lol", "yay", "glad", "enjoy",
];

/// Words counted as negative sentiment.
const NEGATIVE_WORDS: &[&str] = &[
    "hate", "boring", "bad", "awful", "terrible", "annoying", "tired", "busy", "whatever", "no",
    "never", "stop", "ugh", "meh", "sad", "angry",
];

/// Keywords counted as flirtatious.
const FLIRTY_WORDS: &[&str] = &[
    "cute",
    "beautiful",
    "handsome",
    "gorgeous",
    "babe",
    "sweetheart",
    "adorable",
    "lovely",
    "charming",
    "miss you",
    "thinking of you",
    "date",
    "kiss",
];

/// Positive emoji that count toward sentiment as well as enthusiasm.
const POSITIVE_EMOJI: &[char] = &['😊', '😍', '🥰', '😘', '❤', '💕', '😂', '🤣', '😁', '🔥'];

/// Lexical sentiment score of a set of texts: positive hits minus
/// negative hits, with positive emoji counting as positive words.
pub fn sentiment_score(texts: &[&str]) -> f64 {
    let mut score: i64 = 0;
    for text in texts {
        let lower = text.to_lowercase();
        for word in POSITIVE_WORDS {
            #[allow(clippy::cast_possible_wrap)]
            let hits = lower.matches(word).count() as i64;
            score = score.saturating_add(hits);
        }
        for word in NEGATIVE_WORDS {
            #[allow(clippy::cast_possible_wrap)]
            let hits = count_word(&lower, word) as i64;
            score = score.saturating_sub(hits);
        }
        for c in text.chars() {
            if POSITIVE_EMOJI.contains(&c) {
                score = score.saturating_add(1);
            }
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let score_f = score as f64;
    score_f
}

/// Count whole-word occurrences (negative cues like "no" would otherwise
/// match inside "know" or "notice").
fn count_word(lower: &str, word: &str) -> usize {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| *w == word)
        .count()
}

/// Count flirtatious keyword occurrences in a text.
pub fn flirty_word_count(text: &str) -> usize {
    let lower = text.to_lowercase();
    FLIRTY_WORDS
        .iter()
        .map(|word| lower.matches(word).count())
        .fold(0, usize::saturating_add)
}

/// Whether a text contains at least one emoji.
pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Emoji detection by Unicode block: emoticons, pictographs, transport,
/// supplemental symbols, plus the legacy dingbat/heart ranges.
fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F300..=0x1F5FF   // symbols & pictographs
        | 0x1F600..=0x1F64F // emoticons
        | 0x1F680..=0x1F6FF // transport & map
        | 0x1F900..=0x1FAFF // supplemental symbols
        | 0x2600..=0x27BF   // misc symbols & dingbats
        | 0x2764..=0x2764   // heavy black heart
    )
}
