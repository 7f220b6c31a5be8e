//! Inventory part number masking.

use super::result::ValidationResult;

/// Longest accepted part number.
pub const MAX_LEN: usize = 20;

/// Uppercase alphanumerics only, clipped to [`MAX_LEN`].
pub fn format_part_number(raw: &str) -> ValidationResult {
    let formatted: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_LEN)
        .collect();

    let is_valid = !formatted.is_empty();
    ValidationResult::new(formatted, is_valid)
}
