//! Core conversation types shared by the safety and interest engines.

use serde::{Deserialize, Serialize};

/// Who authored a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person running the analysis (their own messages).
    User,
    /// The other party in the conversation.
    ///
    /// Accepts `"match"` as an input alias since dating apps call the
    /// other party a match.
    #[serde(alias = "match")]
    Contact,
}

/// A single recorded message in a conversation.
///
/// Messages are immutable once recorded and ordered by timestamp within
/// a conversation. Only contact-authored messages are scanned for safety
/// risk; both sides feed engagement scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Raw message text.
    pub text: String,
    /// Epoch milliseconds when the message was sent.
    pub timestamp: i64,
    /// Which side of the conversation sent it.
    pub sender: Sender,
}

impl Message {
    /// Build a contact-authored message.
    pub fn from_contact(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
            sender: Sender::Contact,
        }
    }

    /// Build a user-authored message.
    pub fn from_user(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            text: text.into(),
            timestamp,
            sender: Sender::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        let json = serde_json::to_string(&Sender::Contact).expect("should serialize");
        assert_eq!(json, "\"contact\"");
        let back: Sender = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, Sender::Contact);
    }

    #[test]
    fn test_sender_match_alias() {
        let back: Sender = serde_json::from_str("\"match\"").expect("should accept alias");
        assert_eq!(back, Sender::Contact);
    }

    #[test]
    fn test_message_deserializes_from_plain_json() {
        let json = r#"{"text": "hey there", "timestamp": 1700000000000, "sender": "contact"}"#;
        let msg: Message = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(msg.text, "hey there");
        assert_eq!(msg.timestamp, 1_700_000_000_000);
        assert_eq!(msg.sender, Sender::Contact);
    }
}
