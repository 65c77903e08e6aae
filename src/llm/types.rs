use serde::{Deserialize, Serialize};

use super::LlmError;
use crate::models::{Message, MessageRole};

/// Role tag in a chat-completion exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn shipped to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: ChatRole::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        let role = match msg.role {
            MessageRole::User => ChatRole::User,
            MessageRole::Assistant => ChatRole::Assistant,
        };
        Self {
            role,
            content: msg.content.clone(),
        }
    }
}

/// Chat-completion collaborator. The system prompt and the full history
/// travel on every call; no server-side session state is assumed.
pub trait LanguageModel {
    fn ask(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn conversion_from_transcript_message() {
        let turn: ChatMessage = (&Message::assistant("hello")).into();
        assert_eq!(turn.role, ChatRole::Assistant);
        assert_eq!(turn.content, "hello");
    }
}
