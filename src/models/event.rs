use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::EventKind;

/// A calendar entry: an appointment, a medication reminder, or an exercise
/// slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24-hour
    pub time: String,
    pub kind: EventKind,
}

impl Event {
    pub fn new(title: &str, date: &str, time: &str, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            kind,
        }
    }
}
