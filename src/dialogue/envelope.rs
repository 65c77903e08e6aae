//! Guarded parsing of the scheduler model's JSON status envelope.
//!
//! The model is asked for bare JSON but routinely wraps it in prose or
//! markdown fences. The first balanced object in the text is what gets
//! parsed; anything that still fails to parse is downgraded to an ordinary
//! "asking" message carrying the raw text verbatim, so a malformed reply can
//! never end the session.

use serde::Deserialize;

/// The model's reply envelope, discriminated by `status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModelReply {
    Asking {
        response: String,
    },
    Unsupported {
        response: String,
    },
    Complete {
        response: String,
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        time: Option<String>,
        #[serde(default)]
        specialty: Option<String>,
        #[serde(default)]
        doctor: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
}

/// Parse a raw model reply, never failing.
pub fn parse_reply(raw: &str) -> ModelReply {
    if let Some(json) = extract_first_json_object(raw) {
        if let Ok(reply) = serde_json::from_str::<ModelReply>(json) {
            return normalize(reply);
        }
    }
    tracing::debug!("model reply is not a status envelope, surfacing verbatim");
    ModelReply::Asking {
        response: raw.to_string(),
    }
}

/// A `complete` without a usable date and time cannot commit an appointment;
/// downgrade it so the session stays open.
fn normalize(reply: ModelReply) -> ModelReply {
    match reply {
        ModelReply::Complete {
            response,
            date,
            time,
            ..
        } if date.as_deref().map_or(true, str::is_empty)
            || time.as_deref().map_or(true, str::is_empty) =>
        {
            tracing::debug!("complete envelope missing date/time, downgrading to asking");
            ModelReply::Asking { response }
        }
        other => other,
    }
}

/// Find the first balanced `{...}` in text using brace counting, skipping
/// braces inside JSON strings.
fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + i]);
                }
            }
            _ => {}
        }
    }
    None
}
