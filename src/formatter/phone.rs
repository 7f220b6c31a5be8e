//! Country-bounded phone number masking.

use super::country::CountryPhoneProfile;
use super::result::ValidationResult;

/// Extract the national digits from raw input.
///
/// A leading dial code for `profile` is stripped first, so the display
/// form (`+91 9876543210`) can be fed back in unchanged.
pub fn national_digits(raw: &str, profile: &CountryPhoneProfile) -> String {
    let trimmed = raw.trim_start();
    let rest = trimmed.strip_prefix(profile.dial_code).unwrap_or(trimmed);

    rest.chars()
        .filter(char::is_ascii_digit)
        .take(profile.national_digit_limit)
        .collect()
}

/// The stored/display form: dial code, a space, then the national digits.
pub fn display_value(profile: &CountryPhoneProfile, digits: &str) -> String {
    if digits.is_empty() {
        String::new()
    } else {
        format!("{} {}", profile.dial_code, digits)
    }
}

/// Mask raw input as a phone number for `profile`.
pub fn format_phone(raw: &str, profile: &CountryPhoneProfile) -> ValidationResult {
    let digits = national_digits(raw, profile);
    let is_valid = digits.len() == profile.national_digit_limit;
    let display = display_value(profile, &digits);

    ValidationResult::new(digits, is_valid).with_display(display)
}

/// Re-bound already entered digits after the user picks another country.
///
/// Existing digits are truncated to the new limit, never cleared.
pub fn switch_profile(current_digits: &str, profile: &CountryPhoneProfile) -> ValidationResult {
    let digits: String = current_digits
        .chars()
        .filter(char::is_ascii_digit)
        .take(profile.national_digit_limit)
        .collect();
    let is_valid = digits.len() == profile.national_digit_limit;
    let display = display_value(profile, &digits);

    ValidationResult::new(digits, is_valid).with_display(display)
}
