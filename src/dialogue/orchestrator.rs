//! LLM-backed scheduling dialogue.
//!
//! Ships the full transcript to the model on every turn and applies the
//! returned status envelope to the session. State lives in the envelope
//! contract rather than a local step sequence, but the terminal shape is the
//! same `Appointment` the scripted machine emits.

use super::envelope::{parse_reply, ModelReply};
use super::prompt::{build_user_turn, SCHEDULER_SYSTEM_PROMPT};
use super::session::DialogueSession;
use super::types::{DialogueReply, DialogueStep};
use super::DialogueError;
use crate::llm::{ChatMessage, LanguageModel, LlmError};

/// Fixed reply when no language model is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "The scheduling assistant needs a language model, and none is configured right now.";

/// Fixed apology when a language model call fails.
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Drives one scheduling conversation against a `LanguageModel` collaborator.
pub struct LlmScheduler<'a, L: LanguageModel> {
    session: DialogueSession,
    client: &'a L,
}

impl<'a, L: LanguageModel> LlmScheduler<'a, L> {
    pub fn new(client: &'a L) -> Self {
        Self {
            session: DialogueSession::new(),
            client,
        }
    }

    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DialogueSession {
        &mut self.session
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Feed one user utterance to the model and apply its envelope.
    ///
    /// Collaborator failures never fail the dialogue: they surface as fixed
    /// assistant messages with the session state unchanged, and the user can
    /// simply resubmit.
    pub fn submit(&mut self, input: &str) -> Result<DialogueReply, DialogueError> {
        let text = build_user_turn(input);
        if text.is_empty() {
            return Ok(DialogueReply::Ignored);
        }

        self.session.begin_exchange()?;
        let history: Vec<ChatMessage> = self.session.messages().iter().map(Into::into).collect();
        self.session.push_user(&text);
        let result = self.client.ask(SCHEDULER_SYSTEM_PROMPT, &history, &text);
        self.session.finish_exchange();

        let raw = match result {
            Ok(raw) => raw,
            Err(LlmError::NotConfigured) => {
                self.session.push_assistant(NOT_CONFIGURED_MESSAGE);
                return Ok(DialogueReply::Prompt(NOT_CONFIGURED_MESSAGE.to_string()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "language model call failed");
                self.session.push_assistant(APOLOGY_MESSAGE);
                return Ok(DialogueReply::Prompt(APOLOGY_MESSAGE.to_string()));
            }
        };

        match parse_reply(&raw) {
            ModelReply::Asking { response } | ModelReply::Unsupported { response } => {
                self.session.push_assistant(&response);
                Ok(DialogueReply::Prompt(response))
            }
            ModelReply::Complete {
                response,
                date,
                time,
                specialty,
                doctor,
                location,
            } => {
                // envelope::parse_reply guarantees date and time are present
                self.session.draft.date = date;
                self.session.draft.time = time;
                self.session.draft.purpose = specialty;
                self.session.draft.doctor = doctor;
                self.session.draft.location = location;
                self.session.step = DialogueStep::Completed;
                self.session.push_assistant(&response);

                let appointment = self.session.draft.clone().into_appointment();
                Ok(DialogueReply::Completed {
                    message: response,
                    appointment,
                })
            }
        }
    }
}
