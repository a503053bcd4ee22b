//! Deterministic personalization-context rendering.
//!
//! Every renderer here is a pure function of (profile snapshot, task inputs)
//! to a bounded text block: no state, no I/O, no clock. Identical inputs
//! produce byte-identical output, which is what makes prompt content testable
//! without invoking a live model.

mod hint;
mod onboarding;
mod reviewer;
mod trends;
mod tutor;

pub use hint::render_hint_context;
pub use onboarding::render_onboarding_context;
pub use reviewer::render_reviewer_context;
pub use trends::render_trend_context;
pub use tutor::render_tutor_context;

use serde::{Deserialize, Serialize};

/// One turn of a tutoring conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    /// Creates a student turn.
    pub fn student(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Student,
            content: content.into(),
        }
    }

    /// Creates a tutor turn.
    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Tutor,
            content: content.into(),
        }
    }
}

/// Who spoke a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Student,
    Tutor,
}

impl TurnRole {
    /// Uppercase tag used when rendering history lines.
    pub fn tag(&self) -> &'static str {
        match self {
            TurnRole::Student => "STUDENT",
            TurnRole::Tutor => "TUTOR",
        }
    }
}

/// Joins a list for display, with a placeholder when empty.
pub(crate) fn list_or(items: &[String], placeholder: &str) -> String {
    if items.is_empty() {
        placeholder.to_string()
    } else {
        items.join(", ")
    }
}

/// Like [`list_or`] but for a set-backed collection.
pub(crate) fn set_or<'a, I>(items: I, placeholder: &str) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let joined: Vec<&str> = items.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined.join(", ")
    }
}

/// Renders a value-or-placeholder for free-form profile strings.
pub(crate) fn text_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_or_uses_placeholder_when_empty() {
        assert_eq!(list_or(&[], "None yet"), "None yet");
        assert_eq!(
            list_or(&["a".to_string(), "b".to_string()], "None yet"),
            "a, b"
        );
    }

    #[test]
    fn turn_role_tags() {
        assert_eq!(TurnRole::Student.tag(), "STUDENT");
        assert_eq!(TurnRole::Tutor.tag(), "TUTOR");
    }
}
