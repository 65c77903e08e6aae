use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder for a field the scheduling dialogue could not resolve.
pub const TBD: &str = "TBD";

/// A committed appointment record. Owned by the appointment book once the
/// scheduling dialogue emits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor: String,
    pub specialty: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24-hour
    pub time: String,
    pub location: Option<String>,
}

impl Appointment {
    pub fn new(
        doctor: &str,
        specialty: &str,
        date: &str,
        time: &str,
        location: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            doctor: doctor.to_string(),
            specialty: specialty.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            location: location.map(|l| l.to_string()),
        }
    }

    /// Chronological ordering key: ISO date then 24-hour time sort lexically.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.date, &self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_id() {
        let a = Appointment::new("Dr. Chen", "Cardiologist", "2026-08-20", "10:00", None);
        let b = Appointment::new("Dr. Chen", "Cardiologist", "2026-08-20", "10:00", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sort_key_orders_by_date_then_time() {
        let early = Appointment::new("A", "GP", "2026-08-20", "09:00", None);
        let late = Appointment::new("B", "GP", "2026-08-20", "14:30", None);
        let next_day = Appointment::new("C", "GP", "2026-08-21", "08:00", None);
        assert!(early.sort_key() < late.sort_key());
        assert!(late.sort_key() < next_day.sort_key());
    }
}
