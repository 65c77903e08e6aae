//! A bounded scheduling conversation: transcript, draft, step, and the
//! single-outstanding-exchange guard.

use crate::models::Message;

use super::types::{AppointmentDraft, DialogueStep};
use super::DialogueError;

/// State of one scheduling conversation, from open to completion or
/// cancellation. The transcript is append-only; entries are never rewritten.
#[derive(Debug, Clone, Default)]
pub struct DialogueSession {
    messages: Vec<Message>,
    pub draft: AppointmentDraft,
    pub step: DialogueStep,
    busy: bool,
}

impl DialogueSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push_user(&mut self, content: &str) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: &str) {
        self.messages.push(Message::assistant(content));
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the session for one collaborator exchange. Exactly one exchange
    /// may be outstanding; a second claim is the caller submitting while a
    /// call is pending, and a claim on a terminal session is a reply arriving
    /// after the user closed the panel. Both are refused.
    pub fn begin_exchange(&mut self) -> Result<(), DialogueError> {
        if self.step.is_terminal() {
            return Err(DialogueError::SessionClosed);
        }
        if self.busy {
            return Err(DialogueError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    pub fn finish_exchange(&mut self) {
        self.busy = false;
    }

    /// The user closed the panel.
    pub fn cancel(&mut self) {
        self.step = DialogueStep::Cancelled;
    }
}
