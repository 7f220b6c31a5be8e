//! Vehicle registration masking.
//!
//! Plates follow `LL-DD-L{1,2}DDDD`: a two-letter state code, a two-digit
//! district code, a one or two letter series and a four-digit serial.
//! Masking is a left fold of [`step`] over the cleaned input.

use super::result::ValidationResult;
use once_cell::sync::Lazy;
use regex::Regex;

/// Longest possible formatted plate, e.g. `MH-14-AB1234`.
pub const MAX_LEN: usize = 12;

static REGISTRATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2}-[0-9]{2}-[A-Z]{1,2}[0-9]{4}$")
        .expect("Failed to compile registration regex")
});

/// Partial plate plus the counters the next character is judged by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MaskState {
    output: String,
    state_letters: u8,
    district_digits: u8,
    series_letters: u8,
    serial_digits: u8,
    hyphens: u8,
}

impl MaskState {
    fn push_hyphen_if(&mut self, placed: u8) {
        if self.hyphens == placed {
            self.output.push('-');
            self.hyphens += 1;
        }
    }
}

/// Feed one uppercase ASCII alphanumeric into the mask.
///
/// Characters that don't fit the group being filled are dropped.
fn step(mut state: MaskState, c: char) -> MaskState {
    if state.state_letters < 2 {
        if c.is_ascii_alphabetic() {
            state.output.push(c);
            state.state_letters += 1;
        }
        return state;
    }

    if state.district_digits < 2 {
        if c.is_ascii_digit() {
            state.push_hyphen_if(0);
            state.output.push(c);
            state.district_digits += 1;
        }
        return state;
    }

    if state.series_letters == 0 {
        if c.is_ascii_alphabetic() {
            state.push_hyphen_if(1);
            state.output.push(c);
            state.series_letters = 1;
        }
        return state;
    }

    if c.is_ascii_alphabetic() {
        // A second series letter is only taken before the serial starts.
        if state.series_letters == 1 && state.hyphens == 2 && state.serial_digits == 0 {
            state.output.push(c);
            state.series_letters = 2;
        }
        return state;
    }

    if c.is_ascii_digit() && state.serial_digits < 4 {
        state.output.push(c);
        state.serial_digits += 1;
    }

    state
}

/// Mask raw input as a registration plate.
pub fn format_registration(raw: &str) -> ValidationResult {
    let state = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .fold(MaskState::default(), step);

    let is_valid = is_complete(&state.output);
    ValidationResult::new(state.output, is_valid)
}

/// Whether a formatted plate matches the full grammar.
pub fn is_complete(formatted: &str) -> bool {
    REGISTRATION_REGEX.is_match(formatted)
}
