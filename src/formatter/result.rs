//! Result of formatting a single field value.

use serde::{Deserialize, Serialize};

/// Cleaned value plus completion signal for one field.
///
/// Built fresh on every call and never persisted. The formatter itself
/// never sets `error_message`; the owning form attaches one with
/// [`ValidationResult::with_message`] when it decides to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Canonical masked value
    pub formatted_value: String,

    /// Value shown to the user and written to records.
    /// Differs from `formatted_value` only for phone numbers.
    pub display_value: String,

    /// Whether the value satisfies the field's completion grammar
    pub is_valid: bool,

    /// Message chosen by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationResult {
    pub(crate) fn new(formatted_value: String, is_valid: bool) -> Self {
        Self {
            display_value: formatted_value.clone(),
            formatted_value,
            is_valid,
            error_message: None,
        }
    }

    pub(crate) fn with_display(mut self, display_value: String) -> Self {
        self.display_value = display_value;
        self
    }

    /// The result for empty input.
    pub fn empty() -> Self {
        Self::new(String::new(), false)
    }

    /// Attach a caller-chosen message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Whether nothing meaningful has been entered.
    pub fn is_empty(&self) -> bool {
        self.formatted_value.is_empty()
    }
}
