//! OpenAI API client for chat completions and moderation
//!
//! One explicitly constructed client shared by every stage.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::error::InterviewError;
use crate::transcript::Message;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODERATIONS_URL: &str = "https://api.openai.com/v1/moderations";

/// Reusable OpenAI client (connection-pooled)
pub struct OpenAiClient {
    client: Client,
    /// Pre-computed `"Bearer <key>"` header value
    auth_header: String,
    chat_url: String,
    moderations_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            auth_header: format!("Bearer {}", api_key),
            chat_url: CHAT_COMPLETIONS_URL.to_string(),
            moderations_url: MODERATIONS_URL.to_string(),
        }
    }

    fn build_chat_request(transcript: &[Message], model: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: transcript.to_vec(),
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl crate::engine::DialogueEngine for OpenAiClient {
    async fn generate(&self, transcript: &[Message], model: &str) -> crate::Result<String> {
        let request = Self::build_chat_request(transcript, model);

        info!(model = model, messages = transcript.len(), "Calling chat completions API");

        let response = self
            .client
            .post(&self.chat_url)
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completions request failed: {}", e);
                InterviewError::LlmError(format!("OpenAI API error: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat completions error response: {}", error_text);
            return Err(InterviewError::LlmError(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse chat completions response: {}", e);
            InterviewError::LlmError(format!("OpenAI parse error: {}", e))
        })?;

        let utterance = chat_response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| InterviewError::LlmError("No response from OpenAI".to_string()))?;

        Ok(utterance)
    }
}

#[async_trait]
impl crate::engine::ModerationGate for OpenAiClient {
    async fn is_flagged(&self, text: &str) -> crate::Result<bool> {
        let request = ModerationRequest {
            input: text.to_string(),
        };

        info!("Calling moderations API");

        let response = self
            .client
            .post(&self.moderations_url)
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Moderation request failed: {}", e);
                InterviewError::ModerationError(format!("Moderation API error: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Moderation error response: {}", error_text);
            return Err(InterviewError::ModerationError(format!(
                "Moderation API error: {}",
                error_text
            )));
        }

        let moderation: ModerationResponse = response.json().await.map_err(|e| {
            error!("Failed to parse moderation response: {}", e);
            InterviewError::ModerationError(format!("Moderation parse error: {}", e))
        })?;

        let flagged = moderation
            .results
            .first()
            .map(|r| r.flagged)
            .ok_or_else(|| {
                InterviewError::ModerationError("Empty moderation result".to_string())
            })?;

        Ok(flagged)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ModerationRequest {
    input: String,
}

#[derive(Debug, Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationVerdict>,
}

#[derive(Debug, Deserialize)]
struct ModerationVerdict {
    flagged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Message, Role};

    #[test]
    fn test_chat_request_serialization() {
        let transcript = vec![
            Message::system("You are a tax auditor"),
            Message::user("How much tax do I owe?"),
        ];
        let request = OpenAiClient::build_chat_request(&transcript, "gpt-3.5-turbo");

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-3.5-turbo\""));
        assert!(json.contains("\"temperature\":0.0"));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("How much tax do I owe?"));
    }

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{"choices":[{"message":{"content":"Namaste! I am ChatITR."}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.choices[0].message.content.as_deref(),
            Some("Namaste! I am ChatITR.")
        );
    }

    #[test]
    fn test_chat_response_empty_choices() {
        let json = r#"{"choices":[]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.choices.is_empty());
    }

    #[test]
    fn test_moderation_response_deserialization() {
        let json = r#"{"results":[{"flagged":true,"categories":{"hate":true}}]}"#;
        let resp: ModerationResponse = serde_json::from_str(json).unwrap();
        assert!(resp.results[0].flagged);
    }

    #[test]
    fn test_auth_header_precomputed() {
        let client = OpenAiClient::new("sk-test-123".to_string());
        assert_eq!(client.auth_header, "Bearer sk-test-123");
    }

    #[test]
    fn test_message_order_preserved_in_request() {
        let transcript = vec![
            Message::system("instruction"),
            Message::assistant("first question"),
            Message::user("first answer"),
        ];
        let request = OpenAiClient::build_chat_request(&transcript, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[2].content, "first answer");
    }
}
