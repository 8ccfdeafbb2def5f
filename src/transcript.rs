//! Conversation transcript model
//!
//! A transcript is the ordered message history submitted to the chat
//! completions API for one stage. It is seeded with exactly one system
//! instruction and grows only by assistant/user pairs.

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

/// A single immutable message in a stage transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Stage transcript owned by the stage controller for one stage.
///
/// The first message is always the stage's system instruction and is
/// never removed; all later growth happens through `push_exchange`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Seed a transcript with the stage's system instruction
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_instruction)],
        }
    }

    /// Seed a transcript with a system instruction plus one user message
    /// (the extraction stage's two-message shape)
    pub fn with_user(system_instruction: impl Into<String>, user_content: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message::system(system_instruction),
                Message::user(user_content),
            ],
        }
    }

    /// Record one completed assistant/user turn
    pub fn push_exchange(&mut self, assistant: impl Into<String>, user: impl Into<String>) {
        self.messages.push(Message::assistant(assistant));
        self.messages.push(Message::user(user));
    }

    /// Ordered view of the messages, first element the system instruction
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Accumulator for the clarification stage's conversation summary.
///
/// Records every assistant utterance and user reply in emission order;
/// consumed once via `join` when the stage terminates.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuffer {
    utterances: Vec<String>,
}

impl SummaryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, utterance: impl Into<String>) {
        self.utterances.push(utterance.into());
    }

    pub fn utterance_count(&self) -> usize {
        self.utterances.len()
    }

    /// Space-joined concatenation in strict emission order
    pub fn join(&self) -> String {
        self.utterances.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_seeded_with_system_message() {
        let transcript = Transcript::new("You are a tax auditor.");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[0].content, "You are a tax auditor.");
    }

    #[test]
    fn test_push_exchange_preserves_system_head() {
        let mut transcript = Transcript::new("instruction");
        transcript.push_exchange("What is your primary income source?", "Salary");
        transcript.push_exchange("How much do you earn annually?", "12 LPA");

        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[1].role, Role::Assistant);
        assert_eq!(transcript.messages()[2].role, Role::User);
        assert_eq!(transcript.messages()[2].content, "Salary");

        // Exactly one system message regardless of turns
        let system_count = transcript
            .messages()
            .iter()
            .filter(|m| m.role == Role::System)
            .count();
        assert_eq!(system_count, 1);
    }

    #[test]
    fn test_two_message_extraction_shape() {
        let transcript = Transcript::with_user("extract", "the summary text");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].role, Role::System);
        assert_eq!(transcript.messages()[1].role, Role::User);
    }

    #[test]
    fn test_summary_join_order() {
        let mut buffer = SummaryBuffer::new();
        buffer.record("Q1");
        buffer.record("A1");
        buffer.record("Q2");
        buffer.record("Yes");

        assert_eq!(buffer.utterance_count(), 4);
        assert_eq!(buffer.join(), "Q1 A1 Q2 Yes");
    }

    #[test]
    fn test_message_role_serialization() {
        let msg = Message::assistant("hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(json.contains("\"content\":\"hello\""));
    }
}
