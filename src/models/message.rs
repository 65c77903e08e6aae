use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ChatView, MessageRole};

/// One turn of an assistant conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: NaiveDateTime,
    /// View the message was produced under; `None` means it shows everywhere.
    pub view: Option<ChatView>,
}

impl Message {
    pub fn user(content: &str) -> Self {
        Self::new(MessageRole::User, content, None)
    }

    pub fn assistant(content: &str) -> Self {
        Self::new(MessageRole::Assistant, content, None)
    }

    pub fn with_view(role: MessageRole, content: &str, view: ChatView) -> Self {
        Self::new(role, content, Some(view))
    }

    fn new(role: MessageRole, content: &str, view: Option<ChatView>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.to_string(),
            timestamp: Local::now().naive_local(),
            view,
        }
    }
}
