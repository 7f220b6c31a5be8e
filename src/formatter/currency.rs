//! Currency amount masking.
//!
//! Keeps ASCII digits and the first `.`; every later `.` is dropped, so
//! `12.34.56` becomes `12.3456`. Other characters, `,` included, are dropped.

use super::result::ValidationResult;

/// Maximum number of digits, not counting the separator.
pub const MAX_DIGITS: usize = 8;

/// Mask raw input as a non-negative decimal amount.
pub fn format_amount(raw: &str) -> ValidationResult {
    let mut formatted = String::with_capacity(MAX_DIGITS + 1);
    let mut digits = 0;
    let mut has_separator = false;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            if digits < MAX_DIGITS {
                formatted.push(c);
                digits += 1;
            }
        } else if c == '.' && !has_separator {
            formatted.push('.');
            has_separator = true;
        }
    }

    ValidationResult::new(formatted, digits > 0)
}

/// Canonical decimal text for a formatted amount: `.5` -> `0.5`, `12.` -> `12`.
///
/// Returns `None` when the amount has no digits.
pub fn normalized_amount(formatted: &str) -> Option<String> {
    if !formatted.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let trimmed = formatted.trim_end_matches('.');
    if trimmed.starts_with('.') {
        Some(format!("0{}", trimmed))
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_separator_dropped() {
        let result = format_amount("12.34.56");
        assert_eq!(result.formatted_value, "12.3456");
        assert!(result.is_valid);
    }

    #[test]
    fn test_digit_cap_ignores_separator() {
        assert_eq!(format_amount("123456789").formatted_value, "12345678");
        assert_eq!(format_amount("1234.56789").formatted_value, "1234.5678");
    }

    #[test]
    fn test_other_characters_dropped() {
        assert_eq!(format_amount("₹ 1,250.00").formatted_value, "1250.00");
        assert_eq!(format_amount("-5").formatted_value, "5");
    }

    #[test]
    fn test_separator_alone_invalid() {
        let result = format_amount(".");
        assert_eq!(result.formatted_value, ".");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_normalized_amount() {
        assert_eq!(normalized_amount(".5").as_deref(), Some("0.5"));
        assert_eq!(normalized_amount("12.").as_deref(), Some("12"));
        assert_eq!(normalized_amount("12.3456").as_deref(), Some("12.3456"));
        assert_eq!(normalized_amount("."), None);
        assert_eq!(normalized_amount(""), None);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["12.34.56", "..1", "999999999.9", "abc"] {
            let once = format_amount(raw).formatted_value;
            assert_eq!(format_amount(&once).formatted_value, once);
        }
    }
}
