//! HTTP chat-completions client and the mock used in tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::types::{ChatMessage, LanguageModel};
use super::LlmError;

/// Blocking client for an OpenAI-style `/v1/chat/completions` endpoint.
///
/// Construction never touches the network; a missing API key only surfaces
/// as `LlmError::NotConfigured` when `ask` is called, so hosts can build the
/// client unconditionally and let the dialogue degrade gracefully.
pub struct HttpChatClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpChatClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: None,
            client,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Read the API key from `CARDIOTWIN_API_KEY` if set.
    pub fn with_api_key_from_env(mut self) -> Self {
        self.api_key = std::env::var("CARDIOTWIN_API_KEY").ok();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for /v1/chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

/// Response body from /v1/chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LanguageModel for HttpChatClient {
    fn ask(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::NotConfigured)?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(user_message));

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.7,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    LlmError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    LlmError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::ResponseParsing("response carried no choices".to_string()))
    }
}

/// Mock chat client for tests: plays back scripted replies in order,
/// repeating the last one, and records the history length of each call.
pub struct MockChatClient {
    replies: Mutex<VecDeque<String>>,
    last_reply: Mutex<Option<String>>,
    history_lengths: Mutex<Vec<usize>>,
    failure: Option<MockFailure>,
}

enum MockFailure {
    NotConfigured,
    Transport,
}

impl MockChatClient {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            last_reply: Mutex::new(None),
            history_lengths: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A client with no credentials behind it.
    pub fn unavailable() -> Self {
        Self {
            failure: Some(MockFailure::NotConfigured),
            ..Self::new(&[])
        }
    }

    /// A client whose endpoint is unreachable.
    pub fn failing() -> Self {
        Self {
            failure: Some(MockFailure::Transport),
            ..Self::new(&[])
        }
    }

    /// History length observed on each `ask`, in call order.
    pub fn recorded_history_lengths(&self) -> Vec<usize> {
        self.history_lengths.lock().unwrap().clone()
    }
}

impl LanguageModel for MockChatClient {
    fn ask(
        &self,
        _system_prompt: &str,
        history: &[ChatMessage],
        _user_message: &str,
    ) -> Result<String, LlmError> {
        self.history_lengths.lock().unwrap().push(history.len());

        match self.failure {
            Some(MockFailure::NotConfigured) => return Err(LlmError::NotConfigured),
            Some(MockFailure::Transport) => {
                return Err(LlmError::Connection("http://localhost:0".to_string()))
            }
            None => {}
        }

        let mut replies = self.replies.lock().unwrap();
        let mut last = self.last_reply.lock().unwrap();
        if let Some(next) = replies.pop_front() {
            *last = Some(next.clone());
            return Ok(next);
        }
        last.clone()
            .ok_or_else(|| LlmError::ResponseParsing("mock has no replies".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let client = HttpChatClient::new("http://localhost:11434/", "gpt-4o", 60);
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn ask_without_api_key_is_not_configured() {
        let client = HttpChatClient::new("http://localhost:11434", "gpt-4o", 60);
        let err = client.ask("system", &[], "hello").unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[test]
    fn mock_plays_replies_in_order_then_repeats() {
        let client = MockChatClient::new(&["one", "two"]);
        assert_eq!(client.ask("s", &[], "u").unwrap(), "one");
        assert_eq!(client.ask("s", &[], "u").unwrap(), "two");
        assert_eq!(client.ask("s", &[], "u").unwrap(), "two");
    }

    #[test]
    fn mock_records_history_lengths() {
        let client = MockChatClient::new(&["reply"]);
        let history = vec![ChatMessage::user("a"), ChatMessage::assistant("b")];
        client.ask("s", &history, "u").unwrap();
        client.ask("s", &[], "u").unwrap();
        assert_eq!(client.recorded_history_lengths(), vec![2, 0]);
    }

    #[test]
    fn unavailable_mock_reports_not_configured() {
        let client = MockChatClient::unavailable();
        assert!(matches!(
            client.ask("s", &[], "u").unwrap_err(),
            LlmError::NotConfigured
        ));
    }

    #[test]
    fn failing_mock_reports_connection_error() {
        let client = MockChatClient::failing();
        assert!(matches!(
            client.ask("s", &[], "u").unwrap_err(),
            LlmError::Connection(_)
        ));
    }
}
