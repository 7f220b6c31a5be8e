//! Identifier formatting and validation.
//!
//! Every input-change event on a form runs the raw text through [`format`]
//! together with the field's [`FieldKind`]. The result carries the masked
//! value and a validity flag; deciding what to tell the user is left to the
//! caller. Nothing here touches shared state or I/O, and malformed input is
//! never an error: characters that don't fit are silently dropped.

pub mod country;
pub mod currency;
pub mod kind;
pub mod license;
pub mod part_number;
pub mod phone;
pub mod registration;
pub mod result;

pub use country::{default_profile, find_profile, CountryPhoneProfile, COUNTRY_PROFILES};
pub use kind::FieldKind;
pub use result::ValidationResult;

/// Format `raw_input` for `kind`.
///
/// `previous_value` is the value the field held before this edit. For the
/// hyphenated masks it turns a backspace over an auto-inserted hyphen into a
/// deletion of the character in front of it; otherwise the re-masking would
/// put the hyphen straight back. The deletion only applies when everything
/// typed after the hyphen still survives masking, so an edit in the middle
/// of a plate never loses the characters behind it. Pass an empty string
/// when there is no previous value.
pub fn format(raw_input: &str, kind: FieldKind, previous_value: &str) -> ValidationResult {
    if kind.is_hyphenated() {
        if let Some((edited, tail)) = undo_hyphen_backspace(raw_input, previous_value) {
            let result = format_kind(&edited, kind);
            if keeps_tail(&result.formatted_value, &tail) {
                return result;
            }
        }
    }

    format_kind(raw_input, kind)
}

/// Re-bound phone digits for a newly selected country profile.
pub fn switch_phone_profile(current_digits: &str, profile: &CountryPhoneProfile) -> ValidationResult {
    phone::switch_profile(current_digits, profile)
}

fn format_kind(raw_input: &str, kind: FieldKind) -> ValidationResult {
    match kind {
        FieldKind::VehicleRegistration => registration::format_registration(raw_input),
        FieldKind::DriverLicense => license::format_license(raw_input),
        FieldKind::PhoneNumber(profile) => phone::format_phone(raw_input, profile),
        FieldKind::PartNumber => part_number::format_part_number(raw_input),
        FieldKind::CurrencyAmount => currency::format_amount(raw_input),
    }
}

/// Detect a single deleted hyphen and also delete the alphanumeric before it.
///
/// Returns the edited input and the uppercased alphanumerics that followed
/// the hyphen.
fn undo_hyphen_backspace(raw_input: &str, previous_value: &str) -> Option<(String, String)> {
    let raw: Vec<char> = raw_input.chars().collect();
    let previous: Vec<char> = previous_value.chars().collect();

    if raw.len() + 1 != previous.len() {
        return None;
    }

    let removed_at = raw
        .iter()
        .zip(previous.iter())
        .position(|(a, b)| a != b)
        .unwrap_or(raw.len());

    if previous[removed_at] != '-' || raw[removed_at..] != previous[removed_at + 1..] {
        return None;
    }

    let victim = raw[..removed_at]
        .iter()
        .rposition(|c| c.is_ascii_alphanumeric())?;

    let edited = raw
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != victim)
        .map(|(_, c)| c)
        .collect();
    let tail = meaningful(raw[removed_at..].iter().copied());

    Some((edited, tail))
}

/// Whether the masked value still ends with every character of `tail`.
fn keeps_tail(formatted: &str, tail: &str) -> bool {
    meaningful(formatted.chars()).ends_with(tail)
}

fn meaningful(chars: impl Iterator<Item = char>) -> String {
    chars
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
