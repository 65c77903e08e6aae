//! Natural-language date/time extraction for the scripted scheduling flow.
//!
//! Extraction rules are ordered and first-match-wins per field: a later rule
//! never overrides a field an earlier rule already resolved. A time token
//! must carry an explicit `:MM` part or an am/pm suffix; a bare number is
//! never treated as an hour, so a date-only phrase like "January 15" does
//! not accidentally parse a time out of the "15".

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use regex::Regex;

/// A date and time pulled out of one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Extract a date and a time from free-form text. Returns `None` unless BOTH
/// were resolved; partial extraction re-prompts at the caller.
pub fn parse(input: &str, today: NaiveDate) -> Option<ParsedDateTime> {
    let date = extract_date(input, today)?;
    let time = extract_time(input)?;
    Some(ParsedDateTime { date, time })
}

fn extract_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = input.to_lowercase();

    if lower.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }

    if lower.contains("today") {
        return Some(today);
    }

    // Numeric M/D/YYYY or M-D-YYYY
    let numeric = Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap();
    if let Some(cap) = numeric.captures(input) {
        let month: u32 = cap[1].parse().unwrap_or(0);
        let day: u32 = cap[2].parse().unwrap_or(0);
        let year: i32 = cap[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    // Month name or 3-letter abbreviation + day, with optional year
    let month_day = Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\b\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s+(\d{4}))?",
    )
    .unwrap();
    if let Some(cap) = month_day.captures(input) {
        let name = cap[1].to_lowercase();
        let month = month_index(&name)?;
        let day: u32 = cap[2].parse().unwrap_or(0);
        let year = cap
            .get(3)
            .and_then(|y| y.as_str().parse().ok())
            .unwrap_or_else(|| today.year());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    None
}

fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .or_else(|| MONTH_ABBREVS.iter().position(|m| *m == name))
        .map(|i| i as u32 + 1)
}

fn extract_time(input: &str) -> Option<NaiveTime> {
    // H:MM with an optional meridiem
    let with_minutes = Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*(am|pm)?").unwrap();
    if let Some(cap) = with_minutes.captures(input) {
        let hour: u32 = cap[1].parse().unwrap_or(0);
        let minute: u32 = cap[2].parse().unwrap_or(60);
        let period = cap.get(3).map(|m| m.as_str());
        if let Some(time) = to_24h(hour, minute, period) {
            return Some(time);
        }
    }

    // Bare hour with a mandatory meridiem ("2pm", "2 pm")
    let bare_hour = Regex::new(r"(?i)\b(\d{1,2})\s*(am|pm)\b").unwrap();
    if let Some(cap) = bare_hour.captures(input) {
        let hour: u32 = cap[1].parse().unwrap_or(0);
        if let Some(time) = to_24h(hour, 0, Some(&cap[2])) {
            return Some(time);
        }
    }

    None
}

fn to_24h(hour: u32, minute: u32, period: Option<&str>) -> Option<NaiveTime> {
    let hour = match period.map(|p| p.to_lowercase()) {
        Some(p) if p == "pm" && hour != 12 => hour + 12,
        Some(p) if p == "am" && hour == 12 => 0,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}
