//! Chat controller: owns the transcript, the current view, and the
//! collaborator ports. The UI is a thin adapter that dispatches user events
//! here and renders the resulting state.

use crate::chat;
use crate::dialogue::directives::{extract_directives, Directive};
use crate::dialogue::orchestrator::{APOLOGY_MESSAGE, NOT_CONFIGURED_MESSAGE};
use crate::dialogue::DialogueError;
use crate::llm::{ChatMessage, LanguageModel, LlmError};
use crate::models::{ChatView, Message, MessageRole};
use crate::speech::Transcriber;
use crate::store::SessionStore;

/// System prompt for the free-form assistant conversation.
pub const ASSISTANT_SYSTEM_PROMPT: &str = "You are a helpful health assistant for a cardiac \
     monitoring app called CardioTwin. You help users with general health questions, appointment \
     scheduling, medication reminders, and cardiac health guidance.\n\n\
     You have access to the full conversation history, so you can reference previous messages \
     and build upon the information already gathered.\n\n\
     Keep responses concise and friendly. If users ask about serious symptoms, advise them to \
     contact their healthcare provider immediately.\n\n\
     When the user asks to open a part of the app, you may embed one navigation token such as \
     [NAV:appointments] or [NAV:calendar] in your reply, and when they want to book an \
     appointment you may embed [SCHEDULE]. The app removes the token from the displayed text \
     and performs the action.\n\n\
     Always be supportive and professional in your responses.";

/// Fixed message when transcription fails.
pub const TRANSCRIPTION_FAILED_MESSAGE: &str = "Failed to transcribe audio. Please try again.";

/// An assistant reply ready to render, with any side effects the host must
/// perform separately.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub text: String,
    pub directives: Vec<Directive>,
}

/// Outcome of a voice exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOutcome {
    /// Transcription produced nothing usable; nothing was recorded.
    NoSpeech,
    /// The transcription collaborator failed; show the fixed message.
    TranscriptionFailed,
    /// A normal exchange happened.
    Reply(AssistantReply),
}

/// The assistant conversation controller.
pub struct Assistant<S: SessionStore> {
    store: S,
    messages: Vec<Message>,
    view: ChatView,
    first_visit: bool,
    busy: bool,
}

impl<S: SessionStore> Assistant<S> {
    /// Load persisted state, seeding the welcome message when nothing
    /// readable is stored.
    pub fn open(store: S) -> Self {
        let messages = store
            .load_history()
            .unwrap_or_else(|| vec![Message::assistant(chat::WELCOME_MESSAGE)]);
        let first_visit = store.load_first_visit();
        Self {
            store,
            messages,
            view: ChatView::General,
            first_visit,
            busy: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages shown in the current view: its own plus view-less and
    /// general ones.
    pub fn visible_messages(&self) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| match m.view {
                None | Some(ChatView::General) => true,
                Some(view) => view == self.view,
            })
            .collect()
    }

    pub fn view(&self) -> ChatView {
        self.view
    }

    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn mark_visited(&mut self) {
        self.first_visit = false;
        if let Err(e) = self.store.save_first_visit(false) {
            tracing::warn!(error = %e, "could not persist first-visit flag");
        }
    }

    /// Switch views, announcing focused views once per actual change.
    pub fn set_view(&mut self, view: ChatView) {
        if view == self.view {
            return;
        }
        self.view = view;
        if let Some(announcement) = chat::view_change_message(view) {
            self.push(Message::with_view(MessageRole::Assistant, announcement, view));
        }
    }

    /// Scripted exchange: answer from the canned response tables.
    pub fn submit_scripted(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.push(Message::with_view(MessageRole::User, text, self.view));
        let reply = chat::generate_reply(text, self.view);
        self.push(Message::with_view(MessageRole::Assistant, &reply, self.view));
        Some(reply)
    }

    /// LLM exchange with full history. Collaborator failures degrade to
    /// fixed assistant messages; the conversation always stays usable.
    pub fn submit_llm<L: LanguageModel>(
        &mut self,
        client: &L,
        text: &str,
    ) -> Result<Option<AssistantReply>, DialogueError> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Ok(None);
        }
        if self.busy {
            return Err(DialogueError::Busy);
        }
        self.busy = true;
        let reply = self.llm_exchange(client, &text);
        self.busy = false;
        Ok(Some(reply))
    }

    /// Voice exchange: transcribe, then run the LLM exchange on the
    /// transcript.
    pub fn submit_voice<T: Transcriber, L: LanguageModel>(
        &mut self,
        transcriber: &T,
        client: &L,
        audio: &[u8],
    ) -> Result<VoiceOutcome, DialogueError> {
        if self.busy {
            return Err(DialogueError::Busy);
        }
        self.busy = true;

        let transcript = match transcriber.transcribe(audio) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "transcription failed");
                self.busy = false;
                return Ok(VoiceOutcome::TranscriptionFailed);
            }
        };
        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            self.busy = false;
            return Ok(VoiceOutcome::NoSpeech);
        }

        let reply = self.llm_exchange(client, &transcript);
        self.busy = false;
        Ok(VoiceOutcome::Reply(reply))
    }

    /// Reset the conversation to the fixed welcome message.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.clear_history() {
            tracing::warn!(error = %e, "could not clear stored history");
        }
        self.messages = vec![Message::assistant(chat::WELCOME_MESSAGE)];
        self.persist();
    }

    fn llm_exchange<L: LanguageModel>(&mut self, client: &L, text: &str) -> AssistantReply {
        let history: Vec<ChatMessage> = self.messages.iter().map(Into::into).collect();
        self.push(Message::with_view(MessageRole::User, text, self.view));

        let raw = match client.ask(ASSISTANT_SYSTEM_PROMPT, &history, text) {
            Ok(raw) => raw,
            Err(LlmError::NotConfigured) => {
                self.push(Message::assistant(NOT_CONFIGURED_MESSAGE));
                return AssistantReply {
                    text: NOT_CONFIGURED_MESSAGE.to_string(),
                    directives: Vec::new(),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "assistant model call failed");
                self.push(Message::assistant(APOLOGY_MESSAGE));
                return AssistantReply {
                    text: APOLOGY_MESSAGE.to_string(),
                    directives: Vec::new(),
                };
            }
        };

        let (display, directives) = extract_directives(&raw);
        self.push(Message::with_view(MessageRole::Assistant, &display, self.view));
        AssistantReply {
            text: display,
            directives,
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_history(&self.messages) {
            tracing::warn!(error = %e, "could not persist chat history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::directives::Page;
    use crate::llm::MockChatClient;
    use crate::speech::MockTranscriber;
    use crate::store::{MemoryStore, SessionStore};

    fn assistant() -> Assistant<MemoryStore> {
        Assistant::open(MemoryStore::new())
    }

    #[test]
    fn open_seeds_welcome_on_empty_store() {
        let a = assistant();
        assert_eq!(a.messages().len(), 1);
        assert_eq!(a.messages()[0].content, chat::WELCOME_MESSAGE);
        assert!(a.is_first_visit());
    }

    #[test]
    fn open_restores_persisted_history() {
        let store = MemoryStore::new();
        store
            .save_history(&[Message::assistant("hi"), Message::user("hello")])
            .unwrap();
        let a = Assistant::open(store);
        assert_eq!(a.messages().len(), 2);
        assert_eq!(a.messages()[1].content, "hello");
    }

    #[test]
    fn scripted_exchange_appends_both_turns_and_persists() {
        let mut a = assistant();
        let reply = a.submit_scripted("show my risk profile").unwrap();
        assert!(reply.contains("risk profile"));
        assert_eq!(a.messages().len(), 3);
        assert_eq!(a.store.load_history().unwrap().len(), 3);
    }

    #[test]
    fn blank_scripted_input_is_ignored() {
        let mut a = assistant();
        assert!(a.submit_scripted("   ").is_none());
        assert_eq!(a.messages().len(), 1);
    }

    #[test]
    fn view_change_announces_once() {
        let mut a = assistant();
        a.set_view(ChatView::Risk);
        assert_eq!(a.messages().len(), 2);
        // Setting the same view again stays silent
        a.set_view(ChatView::Risk);
        assert_eq!(a.messages().len(), 2);
        // Back to general stays silent too
        a.set_view(ChatView::General);
        assert_eq!(a.messages().len(), 2);
    }

    #[test]
    fn visible_messages_filter_by_view() {
        let mut a = assistant();
        a.set_view(ChatView::Risk);
        a.submit_scripted("is my risk high?");
        a.set_view(ChatView::Coaching);

        // Welcome (view-less) + coaching announcement; risk turns are hidden
        let visible = a.visible_messages();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].content, chat::WELCOME_MESSAGE);
    }

    #[test]
    fn llm_exchange_strips_directives() {
        let client = MockChatClient::new(&["Opening your calendar. [NAV:calendar]"]);
        let mut a = assistant();
        let reply = a.submit_llm(&client, "open my calendar").unwrap().unwrap();
        assert_eq!(reply.text, "Opening your calendar.");
        assert_eq!(reply.directives, vec![Directive::Navigate(Page::Calendar)]);
        // The stored transcript carries the stripped text
        assert_eq!(a.messages().last().unwrap().content, "Opening your calendar.");
    }

    #[test]
    fn llm_failure_appends_apology_and_recovers() {
        let client = MockChatClient::failing();
        let mut a = assistant();
        let reply = a.submit_llm(&client, "hello").unwrap().unwrap();
        assert_eq!(reply.text, APOLOGY_MESSAGE);
        assert!(!a.is_busy());

        // A later submit still works
        let client = MockChatClient::new(&["All good now."]);
        let reply = a.submit_llm(&client, "hello again").unwrap().unwrap();
        assert_eq!(reply.text, "All good now.");
    }

    #[test]
    fn missing_model_surfaces_fixed_message() {
        let client = MockChatClient::unavailable();
        let mut a = assistant();
        let reply = a.submit_llm(&client, "hello").unwrap().unwrap();
        assert_eq!(reply.text, NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn busy_assistant_refuses_reentrant_submit() {
        let client = MockChatClient::new(&["reply"]);
        let mut a = assistant();
        a.busy = true;
        assert!(matches!(
            a.submit_llm(&client, "hello"),
            Err(DialogueError::Busy)
        ));
    }

    #[test]
    fn voice_exchange_routes_transcript_through_llm() {
        let transcriber = MockTranscriber::new("what is my heart rate?");
        let client = MockChatClient::new(&["Your monitor shows a resting rate of 62."]);
        let mut a = assistant();

        match a.submit_voice(&transcriber, &client, b"audio-bytes").unwrap() {
            VoiceOutcome::Reply(reply) => {
                assert!(reply.text.contains("62"));
            }
            other => panic!("expected a reply, got {other:?}"),
        }
        // user transcript + assistant reply on top of the welcome
        assert_eq!(a.messages().len(), 3);
        assert_eq!(a.messages()[1].content, "what is my heart rate?");
    }

    #[test]
    fn voice_transcription_failure_is_non_fatal() {
        let transcriber = MockTranscriber::failing();
        let client = MockChatClient::new(&["never used"]);
        let mut a = assistant();

        let outcome = a.submit_voice(&transcriber, &client, b"audio").unwrap();
        assert_eq!(outcome, VoiceOutcome::TranscriptionFailed);
        assert_eq!(a.messages().len(), 1);
        assert!(!a.is_busy());
    }

    #[test]
    fn voice_empty_transcript_is_no_speech() {
        let transcriber = MockTranscriber::new("   ");
        let client = MockChatClient::new(&["never used"]);
        let mut a = assistant();

        let outcome = a.submit_voice(&transcriber, &client, b"audio").unwrap();
        assert_eq!(outcome, VoiceOutcome::NoSpeech);
        assert_eq!(a.messages().len(), 1);
    }

    #[test]
    fn clear_resets_to_welcome() {
        let mut a = assistant();
        a.submit_scripted("hello");
        a.clear();
        assert_eq!(a.messages().len(), 1);
        assert_eq!(a.messages()[0].content, chat::WELCOME_MESSAGE);
        assert_eq!(a.store.load_history().unwrap().len(), 1);
    }

    #[test]
    fn mark_visited_persists() {
        let mut a = assistant();
        a.mark_visited();
        assert!(!a.is_first_visit());
        assert!(!a.store.load_first_visit());
    }
}
