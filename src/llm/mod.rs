pub mod http;
pub mod types;

pub use http::{HttpChatClient, MockChatClient};
pub use types::{ChatMessage, ChatRole, LanguageModel};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No language model is configured")]
    NotConfigured,

    #[error("Cannot reach the language model endpoint: {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Language model endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
