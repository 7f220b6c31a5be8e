//! Driver license masking, `LL-` followed by 13 digits.

use super::result::ValidationResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Meaningful characters in a license number: 2 letters + 13 digits.
pub const MAX_MEANINGFUL: usize = 15;

static LICENSE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}-[0-9]{13}$").expect("Failed to compile license regex"));

/// Mask raw input as a driver license number.
pub fn format_license(raw: &str) -> ValidationResult {
    let cleaned: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_MEANINGFUL)
        .collect();

    let formatted = if cleaned.len() > 2 {
        format!("{}-{}", &cleaned[..2], &cleaned[2..])
    } else {
        cleaned
    };

    let is_valid = LICENSE_REGEX.is_match(&formatted);
    ValidationResult::new(formatted, is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_license() {
        let result = format_license("mh1420110062821");
        assert_eq!(result.formatted_value, "MH-1420110062821");
        assert!(result.is_valid);
    }

    #[test]
    fn test_hyphen_only_after_two_characters() {
        assert_eq!(format_license("mh").formatted_value, "MH");
        assert_eq!(format_license("mh1").formatted_value, "MH-1");
        assert!(!format_license("mh1").is_valid);
    }

    #[test]
    fn test_existing_hyphens_stripped() {
        let result = format_license("MH-14-2011-0062821");
        assert_eq!(result.formatted_value, "MH-1420110062821");
        assert!(result.is_valid);
    }

    #[test]
    fn test_clipped_to_fifteen_meaningful() {
        let result = format_license("mh142011006282199");
        assert_eq!(result.formatted_value, "MH-1420110062821");
    }

    #[test]
    fn test_wrong_classes_fail_grammar() {
        // Masking keeps any alphanumeric; only the grammar rejects it.
        let result = format_license("m11420110062821");
        assert_eq!(result.formatted_value, "M1-1420110062821");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_idempotent() {
        for raw in ["mh1420110062821", "mh14", "x", "", "ab-12-cd"] {
            let once = format_license(raw).formatted_value;
            assert_eq!(format_license(&once).formatted_value, once);
        }
    }
}
