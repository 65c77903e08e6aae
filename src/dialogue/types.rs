use serde::{Deserialize, Serialize};

use crate::models::{Appointment, TBD};

/// Where a scheduling dialogue currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueStep {
    Start,
    AskingPurpose,
    AskingDateTime,
    ConfirmingDateTime,
    AskingLocation,
    ConfirmingLocation,
    Completed,
    Cancelled,
}

impl DialogueStep {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl Default for DialogueStep {
    fn default() -> Self {
        Self::Start
    }
}

/// In-progress appointment fields accumulated across dialogue turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub purpose: Option<String>,
    pub doctor: Option<String>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    /// HH:MM, 24-hour
    pub time: Option<String>,
    pub location: Option<String>,
}

impl AppointmentDraft {
    /// Commit the draft. Purpose doubles as specialty; a purpose naming a
    /// doctor ("Dr. ...") is carried into the doctor field. Every unresolved
    /// field lands as "TBD" so a committed record never has a hole.
    pub fn into_appointment(self) -> Appointment {
        let purpose = self.purpose.unwrap_or_else(|| TBD.to_string());
        let doctor = self.doctor.unwrap_or_else(|| {
            if purpose.contains("Dr.") {
                purpose.clone()
            } else {
                TBD.to_string()
            }
        });
        let date = self.date.unwrap_or_else(|| TBD.to_string());
        let time = self.time.unwrap_or_else(|| TBD.to_string());
        let location = self.location.unwrap_or_else(|| TBD.to_string());
        Appointment::new(&doctor, &purpose, &date, &time, Some(&location))
    }
}

/// Outcome of feeding one user utterance to a scheduling dialogue.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueReply {
    /// Blank input; nothing happened.
    Ignored,
    /// The assistant has something to say and the session stays open.
    Prompt(String),
    /// The dialogue finished; the appointment is ready to commit.
    Completed {
        message: String,
        appointment: Appointment,
    },
}
