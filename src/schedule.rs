//! Appointment book, calendar queries, and daily reminders.
//!
//! Owns committed `Appointment` records after a scheduling dialogue emits
//! them, and carries the human-readable date/time formatting the dialogue
//! confirmations reuse.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Appointment, Event};

// ─── Appointment book ─────────────────────────────────────────────────────────

/// Chronologically ordered list of committed appointments.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping chronological order.
    pub fn add(&mut self, appointment: Appointment) {
        tracing::info!(
            date = %appointment.date,
            time = %appointment.time,
            specialty = %appointment.specialty,
            "appointment committed"
        );
        let position = self
            .appointments
            .partition_point(|a| a.sort_key() <= appointment.sort_key());
        self.appointments.insert(position, appointment);
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments on or after the given day.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&Appointment> {
        let cutoff = today.format("%Y-%m-%d").to_string();
        self.appointments
            .iter()
            .filter(|a| a.date.as_str() >= cutoff.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

// ─── Display formatting ───────────────────────────────────────────────────────

/// "this Tuesday, June 25 2025" inside the coming week, "on June 25 2025"
/// beyond it (or in the past).
pub fn format_when(date: NaiveDate, today: NaiveDate) -> String {
    let long = format!("{} {} {}", month_name(date.month()), date.day(), date.year());
    let days_away = (date - today).num_days();
    if (1..=7).contains(&days_away) {
        format!("this {}, {}", date.format("%A"), long)
    } else {
        format!("on {long}")
    }
}

/// 24-hour "14:30" → "2:30 PM". Anything that is not HH:MM (e.g. a "TBD"
/// placeholder) comes back unchanged.
pub fn format_time_12h(time: &str) -> String {
    let Ok(parsed) = NaiveTime::parse_from_str(time, "%H:%M") else {
        return time.to_string();
    };
    let hour24 = parsed.hour();
    let hour12 = match hour24 {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let meridiem = if hour24 >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour12, parsed.minute(), meridiem)
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

// ─── Calendar queries ─────────────────────────────────────────────────────────

/// Events falling on one day, ordered by time.
pub fn events_for<'a>(events: &'a [Event], date: &str) -> Vec<&'a Event> {
    let mut matching: Vec<&Event> = events.iter().filter(|e| e.date == date).collect();
    matching.sort_by(|a, b| a.time.cmp(&b.time));
    matching
}

/// Month-grid layout: leading weekday offset (Sunday-first) and day count.
pub fn month_grid(year: i32, month: u32) -> Option<(u32, u32)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days = (next_month - first).num_days() as u32;
    Some((first.weekday().num_days_from_sunday(), days))
}

// ─── Daily reminders ──────────────────────────────────────────────────────────

/// A checkable entry on the daily alerts list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub label: String,
    pub done: bool,
}

impl Reminder {
    pub fn new(label: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.to_string(),
            done: false,
        }
    }
}

/// Today's reminders with a done-toggle.
#[derive(Debug, Clone, Default)]
pub struct ReminderList {
    items: Vec<Reminder>,
}

impl ReminderList {
    pub fn new(labels: &[&str]) -> Self {
        Self {
            items: labels.iter().map(|l| Reminder::new(l)).collect(),
        }
    }

    pub fn items(&self) -> &[Reminder] {
        &self.items
    }

    /// Flip the done state. Returns false when the id is unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|r| r.id == id) {
            Some(reminder) => {
                reminder.done = !reminder.done;
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.items.iter().filter(|r| !r.done).count()
    }
}
