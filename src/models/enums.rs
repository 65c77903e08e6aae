use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(MessageRole {
    User => "user",
    Assistant => "assistant",
});

str_enum!(ChatView {
    General => "general",
    Risk => "risk",
    Recommendations => "recommendations",
    Coaching => "coaching",
});

str_enum!(EventKind {
    Appointment => "appointment",
    Medication => "medication",
    Exercise => "exercise",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_round_trip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            assert_eq!(MessageRole::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn views_round_trip() {
        for view in [
            ChatView::General,
            ChatView::Risk,
            ChatView::Recommendations,
            ChatView::Coaching,
        ] {
            assert_eq!(ChatView::from_str(view.as_str()).unwrap(), view);
        }
    }

    #[test]
    fn unknown_string_is_rejected() {
        let err = ChatView::from_str("dashboard").unwrap_err();
        assert!(matches!(err, ModelError::InvalidEnum { .. }));
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
        let kind: EventKind = serde_json::from_str(r#""medication""#).unwrap();
        assert_eq!(kind, EventKind::Medication);
    }
}
