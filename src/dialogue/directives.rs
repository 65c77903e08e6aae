//! In-band control tokens the model may embed in its replies.
//!
//! The host strips tokens from the displayed text and acts on them
//! separately. The vocabulary is fixed (`[NAV:<page>]` and `[SCHEDULE]`);
//! anything else stays in the text untouched. Stripping is idempotent:
//! stripping already-stripped text is a no-op.

use regex::Regex;

/// Host pages a directive can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Chat,
    Risk,
    Recommendations,
    Coaching,
    Calendar,
    Appointments,
    Alerts,
    Voice,
}

/// A side effect requested in-band by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Navigate the host UI to a page.
    Navigate(Page),
    /// Hand the conversation over to the appointment scheduler.
    OpenScheduler,
}

const DIRECTIVE_PATTERN: &str =
    r"\[NAV:(home|chat|risk|recommendations|coaching|calendar|appointments|alerts|voice)\]|\[SCHEDULE\]";

/// Pull directives out of a model reply, returning the display text with all
/// tokens removed.
pub fn extract_directives(text: &str) -> (String, Vec<Directive>) {
    let pattern = Regex::new(DIRECTIVE_PATTERN).unwrap();
    let directives = pattern
        .captures_iter(text)
        .map(|cap| match cap.get(1) {
            Some(page) => Directive::Navigate(page_from_token(page.as_str())),
            None => Directive::OpenScheduler,
        })
        .collect();
    (strip_directives(text), directives)
}

/// Remove directive tokens from display text, tidying the whitespace the
/// removal leaves behind.
pub fn strip_directives(text: &str) -> String {
    let pattern = Regex::new(DIRECTIVE_PATTERN).unwrap();
    let stripped = pattern.replace_all(text, "");
    let spaces = Regex::new(r" {2,}").unwrap();
    spaces.replace_all(stripped.trim(), " ").to_string()
}

fn page_from_token(token: &str) -> Page {
    match token {
        "home" => Page::Home,
        "chat" => Page::Chat,
        "risk" => Page::Risk,
        "recommendations" => Page::Recommendations,
        "coaching" => Page::Coaching,
        "calendar" => Page::Calendar,
        "appointments" => Page::Appointments,
        "alerts" => Page::Alerts,
        _ => Page::Voice,
    }
}
