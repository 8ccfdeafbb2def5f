//! Dialogue engine and moderation gate traits
//!
//! The dialogue engine produces the next assistant utterance from a
//! stage transcript; the moderation gate judges whether a user reply is
//! permitted. Both are backed by the OpenAI API in production and by
//! scripted fakes in tests.

use crate::transcript::Message;
use crate::Result;
use async_trait::async_trait;

pub mod openai;
pub use openai::OpenAiClient;

/// Trait for next-utterance generation (LLM controlled)
#[async_trait]
pub trait DialogueEngine: Send + Sync {
    /// Generate the next assistant utterance for a transcript.
    /// Sampling is pinned to temperature 0 by every implementation.
    async fn generate(&self, transcript: &[Message], model: &str) -> Result<String>;
}

/// Trait for content-policy checks on user replies
#[async_trait]
pub trait ModerationGate: Send + Sync {
    /// True when the text violates content policy
    async fn is_flagged(&self, text: &str) -> Result<bool>;
}

/// Scripted dialogue engine for development & testing.
/// Replays canned utterances and records every transcript it was given.
pub struct ScriptedEngine {
    replies: std::sync::Mutex<std::collections::VecDeque<String>>,
    seen_transcripts: std::sync::Mutex<Vec<Vec<Message>>>,
}

impl ScriptedEngine {
    pub fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.into_iter().map(String::from).collect()),
            seen_transcripts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Transcripts captured across all `generate` calls, in order
    pub fn seen_transcripts(&self) -> Vec<Vec<Message>> {
        self.seen_transcripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogueEngine for ScriptedEngine {
    async fn generate(&self, transcript: &[Message], _model: &str) -> Result<String> {
        self.seen_transcripts
            .lock()
            .unwrap()
            .push(transcript.to_vec());

        self.replies.lock().unwrap().pop_front().ok_or_else(|| {
            crate::error::InterviewError::LlmError("scripted engine ran out of replies".to_string())
        })
    }
}

/// Moderation gate that flags a fixed set of phrases
pub struct ScriptedGate {
    flagged_phrases: Vec<String>,
}

impl ScriptedGate {
    pub fn new(flagged_phrases: Vec<&str>) -> Self {
        Self {
            flagged_phrases: flagged_phrases.into_iter().map(String::from).collect(),
        }
    }

    /// Gate that never flags anything
    pub fn permissive() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl ModerationGate for ScriptedGate {
    async fn is_flagged(&self, text: &str) -> Result<bool> {
        Ok(self.flagged_phrases.iter().any(|p| p == text))
    }
}
