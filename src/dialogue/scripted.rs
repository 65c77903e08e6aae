//! Deterministic appointment-scheduling dialogue.
//!
//! A fixed question sequence: purpose → date/time → confirm → location →
//! confirm → commit. Answers that cannot be understood re-prompt without
//! advancing; a rejected confirmation discards the field it covered. There
//! is no retry limit: the machine loops on a step until it gets an answer
//! it can use.

use chrono::NaiveDate;

use super::datetime;
use super::session::DialogueSession;
use super::types::{DialogueReply, DialogueStep};
use crate::schedule::{format_time_12h, format_when};

const PURPOSE_PROMPT: &str = "I will add an appointment to your calendar! What type of appointment \
     would you like to schedule? For example, you could say 'Cardiology appointment' or \
     'Check-up with Dr. Smith'.";

const DATETIME_PROMPT: &str = "Great! Now, when would you like to schedule this appointment? \
     Please tell me the date and time. For example, 'Tomorrow at 2:30 PM' or \
     'January 15th at 10:00 AM'.";

const DATETIME_RETRY_PROMPT: &str = "I couldn't understand the date and time. Could you please \
     try again? For example, 'Tomorrow at 2:30 PM' or 'January 15th at 10:00 AM'.";

const DATETIME_REJECTED_PROMPT: &str =
    "Let's try again. When would you like to schedule this appointment?";

const LOCATION_PROMPT: &str = "Excellent! Now, where will this appointment take place? Please \
     provide the location, such as 'Heart Center, Room 205' or 'Main Hospital, 3rd Floor'.";

const LOCATION_REJECTED_PROMPT: &str =
    "Let's update the location. Where will this appointment take place?";

const COMPLETED_MESSAGE: &str = "Perfect! Your appointment has been added to your schedule. \
     The chat will now close automatically.";

/// The scripted scheduling state machine: a reducer over user utterances.
/// Each `submit` records the turn in the session transcript and yields the
/// next assistant message (or the finished appointment); rendering stays
/// entirely with the caller.
#[derive(Debug, Clone)]
pub struct ScriptedScheduler {
    session: DialogueSession,
    /// Reference day for relative dates and confirmation formatting.
    today: NaiveDate,
}

impl ScriptedScheduler {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            session: DialogueSession::new(),
            today,
        }
    }

    /// Open the dialogue: emits the welcome prompt and starts waiting for a
    /// purpose.
    pub fn begin(&mut self) -> String {
        self.session.step = DialogueStep::AskingPurpose;
        self.session.push_assistant(PURPOSE_PROMPT);
        PURPOSE_PROMPT.to_string()
    }

    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    pub fn step(&self) -> DialogueStep {
        self.session.step
    }

    /// The user closed the panel; the dialogue can no longer advance.
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.today);
    }

    /// Feed one user utterance through the state machine.
    pub fn submit(&mut self, input: &str) -> DialogueReply {
        let text = input.trim();
        if text.is_empty() || self.session.step.is_terminal() {
            return DialogueReply::Ignored;
        }

        self.session.push_user(text);
        let reply = self.transition(text);
        match &reply {
            DialogueReply::Prompt(message) => self.session.push_assistant(message),
            DialogueReply::Completed { message, .. } => self.session.push_assistant(message),
            DialogueReply::Ignored => {}
        }
        reply
    }

    fn transition(&mut self, text: &str) -> DialogueReply {
        let session = &mut self.session;
        match session.step {
            DialogueStep::Start | DialogueStep::AskingPurpose => {
                session.draft.purpose = Some(text.to_string());
                session.step = DialogueStep::AskingDateTime;
                DialogueReply::Prompt(DATETIME_PROMPT.to_string())
            }

            DialogueStep::AskingDateTime => match datetime::parse(text, self.today) {
                Some(parsed) => {
                    let date = parsed.date.format("%Y-%m-%d").to_string();
                    let time = parsed.time.format("%H:%M").to_string();
                    let prompt = format!(
                        "Perfect! I have you scheduled for {} on {} at {}. Is this correct?",
                        session.draft.purpose.as_deref().unwrap_or_default(),
                        date,
                        format_time_12h(&time),
                    );
                    session.draft.date = Some(date);
                    session.draft.time = Some(time);
                    session.step = DialogueStep::ConfirmingDateTime;
                    DialogueReply::Prompt(prompt)
                }
                None => DialogueReply::Prompt(DATETIME_RETRY_PROMPT.to_string()),
            },

            DialogueStep::ConfirmingDateTime => {
                if contains_any(text, &["yes", "correct", "right"]) {
                    session.step = DialogueStep::AskingLocation;
                    DialogueReply::Prompt(LOCATION_PROMPT.to_string())
                } else {
                    session.draft.date = None;
                    session.draft.time = None;
                    session.step = DialogueStep::AskingDateTime;
                    DialogueReply::Prompt(DATETIME_REJECTED_PROMPT.to_string())
                }
            }

            DialogueStep::AskingLocation => {
                session.draft.location = Some(text.to_string());
                session.step = DialogueStep::ConfirmingLocation;
                let prompt = summary_prompt(session, self.today);
                DialogueReply::Prompt(prompt)
            }

            DialogueStep::ConfirmingLocation => {
                if contains_any(text, &["yes", "add", "schedule"]) {
                    session.step = DialogueStep::Completed;
                    let appointment = session.draft.clone().into_appointment();
                    DialogueReply::Completed {
                        message: COMPLETED_MESSAGE.to_string(),
                        appointment,
                    }
                } else {
                    session.draft.location = None;
                    session.step = DialogueStep::AskingLocation;
                    DialogueReply::Prompt(LOCATION_REJECTED_PROMPT.to_string())
                }
            }

            DialogueStep::Completed | DialogueStep::Cancelled => DialogueReply::Ignored,
        }
    }
}

fn summary_prompt(session: &DialogueSession, today: NaiveDate) -> String {
    let when = session
        .draft
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| format_when(d, today))
        .unwrap_or_default();
    format!(
        "Thank you! Your appointment details are:\n\n\
         • {}\n\
         • {} at {}\n\
         • Location: {}\n\n\
         Should I add this appointment to your schedule?",
        session.draft.purpose.as_deref().unwrap_or_default(),
        when,
        format_time_12h(session.draft.time.as_deref().unwrap_or_default()),
        session.draft.location.as_deref().unwrap_or_default(),
    )
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    let lower = text.to_lowercase();
    words.iter().any(|w| lower.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageRole, TBD};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn scheduler() -> ScriptedScheduler {
        let mut scheduler = ScriptedScheduler::new(today());
        scheduler.begin();
        scheduler
    }

    fn prompt(reply: DialogueReply) -> String {
        match reply {
            DialogueReply::Prompt(text) => text,
            other => panic!("expected a prompt, got {other:?}"),
        }
    }

    #[test]
    fn begin_asks_for_purpose() {
        let mut scheduler = ScriptedScheduler::new(today());
        let welcome = scheduler.begin();
        assert!(welcome.contains("What type of appointment"));
        assert_eq!(scheduler.step(), DialogueStep::AskingPurpose);
        assert_eq!(scheduler.session().messages().len(), 1);
    }

    #[test]
    fn happy_path_end_to_end() {
        let mut scheduler = scheduler();

        let reply = prompt(scheduler.submit("Cardiology checkup"));
        assert!(reply.contains("date and time"));

        let reply = prompt(scheduler.submit("tomorrow at 2pm"));
        assert!(reply.contains("2026-08-09"));
        assert!(reply.contains("2:00 PM"));
        assert!(reply.contains("Is this correct?"));

        let reply = prompt(scheduler.submit("yes"));
        assert!(reply.contains("where will this appointment take place"));

        let reply = prompt(scheduler.submit("Heart Center"));
        assert!(reply.contains("Heart Center"));
        assert!(reply.contains("Should I add this appointment"));

        match scheduler.submit("yes") {
            DialogueReply::Completed {
                message,
                appointment,
            } => {
                assert!(message.contains("has been added"));
                assert_eq!(appointment.specialty, "Cardiology checkup");
                assert_eq!(appointment.doctor, TBD);
                assert_eq!(appointment.date, "2026-08-09");
                assert_eq!(appointment.time, "14:00");
                assert_eq!(appointment.location.as_deref(), Some("Heart Center"));
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(scheduler.step(), DialogueStep::Completed);
    }

    #[test]
    fn transcript_records_both_sides_in_order() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");
        scheduler.submit("tomorrow at 2pm");

        let roles: Vec<MessageRole> = scheduler
            .session()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::Assistant, // welcome
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
    }

    #[test]
    fn unparseable_datetime_reprompts_without_advancing() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");

        let reply = prompt(scheduler.submit("whenever works"));
        assert!(reply.contains("couldn't understand"));
        assert_eq!(scheduler.step(), DialogueStep::AskingDateTime);
        assert!(scheduler.session().draft.date.is_none());

        // The machine loops indefinitely on this step
        prompt(scheduler.submit("no idea"));
        assert_eq!(scheduler.step(), DialogueStep::AskingDateTime);
    }

    #[test]
    fn rejecting_datetime_discards_parsed_values() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");
        scheduler.submit("tomorrow at 2pm");
        assert_eq!(scheduler.session().draft.date.as_deref(), Some("2026-08-09"));

        let reply = prompt(scheduler.submit("no, that's wrong"));
        assert!(reply.contains("Let's try again"));
        assert_eq!(scheduler.step(), DialogueStep::AskingDateTime);
        assert!(scheduler.session().draft.date.is_none());
        assert!(scheduler.session().draft.time.is_none());

        // A fresh answer is not merged with the discarded one
        scheduler.submit("January 15 at 10am");
        assert_eq!(scheduler.session().draft.date.as_deref(), Some("2026-01-15"));
        assert_eq!(scheduler.session().draft.time.as_deref(), Some("10:00"));
    }

    #[test]
    fn rejecting_location_discards_it() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");
        scheduler.submit("tomorrow at 2pm");
        scheduler.submit("yes");
        scheduler.submit("Heart Center");

        let reply = prompt(scheduler.submit("no, another place"));
        assert!(reply.contains("update the location"));
        assert_eq!(scheduler.step(), DialogueStep::AskingLocation);
        assert!(scheduler.session().draft.location.is_none());
    }

    #[test]
    fn confirmation_accepts_schedule_keyword() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up with Dr. Smith");
        scheduler.submit("tomorrow at 2pm");
        scheduler.submit("correct");
        scheduler.submit("Main Hospital, 3rd Floor");

        match scheduler.submit("please schedule it") {
            DialogueReply::Completed { appointment, .. } => {
                assert_eq!(appointment.doctor, "Check-up with Dr. Smith");
                assert_eq!(
                    appointment.location.as_deref(),
                    Some("Main Hospital, 3rd Floor")
                );
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn summary_formats_date_within_week() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");
        // 2026-08-11 is the coming Tuesday
        scheduler.submit("August 11 at 9:30am");
        scheduler.submit("yes");
        let reply = prompt(scheduler.submit("Cardiac Clinic, Floor 3"));
        assert!(reply.contains("this Tuesday, August 11 2026 at 9:30 AM"));
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut scheduler = scheduler();
        assert_eq!(scheduler.submit("   "), DialogueReply::Ignored);
        assert_eq!(scheduler.step(), DialogueStep::AskingPurpose);
        assert_eq!(scheduler.session().messages().len(), 1);
    }

    #[test]
    fn terminal_steps_ignore_input() {
        let mut scheduler = scheduler();
        scheduler.cancel();
        assert_eq!(scheduler.submit("hello"), DialogueReply::Ignored);
        assert_eq!(scheduler.step(), DialogueStep::Cancelled);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut scheduler = scheduler();
        scheduler.submit("Check-up");
        scheduler.reset();
        assert_eq!(scheduler.step(), DialogueStep::Start);
        assert!(scheduler.session().draft.purpose.is_none());
        assert!(scheduler.session().messages().is_empty());
    }
}
