//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID is not a UUID.
    InvalidId(String),

    /// The registration number does not match the plate grammar.
    InvalidRegistration(String),

    /// The license number does not match the license grammar.
    InvalidLicense(String),

    /// The phone number does not have the profile's digit count.
    InvalidPhone(String),

    /// No phone profile exists for the country code.
    UnknownCountry(String),

    /// The part number is empty after cleaning.
    InvalidPartNumber(String),

    /// The amount is not a non-negative decimal.
    InvalidAmount(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidId(id) => write!(f, "Invalid record ID: {}", id),
            Self::InvalidRegistration(value) => {
                write!(f, "Invalid registration number: {}", value)
            }
            Self::InvalidLicense(value) => write!(f, "Invalid license number: {}", value),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::UnknownCountry(code) => write!(f, "Unknown country code: {}", code),
            Self::InvalidPartNumber(value) => write!(f, "Invalid part number: {}", value),
            Self::InvalidAmount(value) => write!(f, "Invalid amount: {}", value),
        }
    }
}

impl std::error::Error for ValidationError {}
