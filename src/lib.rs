//! Chaperone — a trust and safety scoring engine for dating-app
//! conversations.
//!
//! Deterministic rule-based risk scoring over conversation text, plus an
//! optional LLM second opinion with a deterministic fallback, plus an
//! independent interest/engagement scorer. Pure library core with a thin
//! CLI; upstream surfaces (UI, message capture) live elsewhere and hand
//! in already-parsed message lists.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ai;
pub mod config;
pub mod interest;
pub mod logging;
pub mod providers;
pub mod safety;
pub mod types;

pub use ai::{analyze_conversation_with_ai, AiSafetyAnalysis, SafetyReport};
pub use interest::{analyze_interest, InterestAnalysis, InterestLevel};
pub use safety::{analyze_conversation_safety, SafetyAlert, SafetyCheck};
pub use types::{Message, Sender};
