//! PhoneNumber value object.

use super::errors::ValidationError;
use crate::formatter::country::{find_profile, CountryPhoneProfile, COUNTRY_PROFILES};
use crate::formatter::phone::{display_value, format_phone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A complete phone number bound to a country profile.
///
/// Serialized in its display form, `+91 9876543210`, which is what records
/// store.
///
/// # Example
///
/// ```
/// use fleet_mcp_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("98765 43210", "IN").unwrap();
/// assert_eq!(phone.to_string(), "+91 9876543210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    profile: &'static CountryPhoneProfile,
    digits: String,
}

impl PhoneNumber {
    /// Create a new PhoneNumber for the country `iso_code`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownCountry` for an unknown code and
    /// `ValidationError::InvalidPhone` unless exactly the profile's digit
    /// count is present (extra digits are clipped first).
    pub fn new(raw: impl AsRef<str>, iso_code: &str) -> Result<Self, ValidationError> {
        let profile =
            find_profile(iso_code).ok_or_else(|| ValidationError::UnknownCountry(iso_code.to_string()))?;
        Self::with_profile(raw, profile)
    }

    /// Create a new PhoneNumber for an already resolved profile.
    pub fn with_profile(
        raw: impl AsRef<str>,
        profile: &'static CountryPhoneProfile,
    ) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        let result = format_phone(raw, profile);
        if !result.is_valid {
            return Err(ValidationError::InvalidPhone(raw.to_string()));
        }

        Ok(Self {
            profile,
            digits: result.formatted_value,
        })
    }

    /// Parse the display form back, matching the dial code against the
    /// profile table. Shared dial codes resolve to the first profile whose
    /// digit count fits.
    pub fn from_display(display: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPhone(display.to_string());
        let (dial_code, national) = display.trim().split_once(' ').ok_or_else(invalid)?;

        COUNTRY_PROFILES
            .iter()
            .filter(|p| p.dial_code == dial_code)
            .find_map(|p| Self::with_profile(national, p).ok())
            .ok_or_else(invalid)
    }

    pub fn profile(&self) -> &'static CountryPhoneProfile {
        self.profile
    }

    /// Get the phone number with only the national digits.
    pub fn digits_only(&self) -> &str {
        &self.digits
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::from_display(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_value(self.profile, &self.digits))
    }
}
