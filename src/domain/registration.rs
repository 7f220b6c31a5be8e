//! VehicleRegistration value object.

use super::errors::ValidationError;
use crate::formatter::registration::format_registration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A complete, canonically masked registration plate.
///
/// # Example
///
/// ```
/// use fleet_mcp_server::domain::VehicleRegistration;
///
/// let plate = VehicleRegistration::new("mh 14 ab 1234").unwrap();
/// assert_eq!(plate.as_str(), "MH-14-AB1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VehicleRegistration(String);

impl VehicleRegistration {
    /// Mask `raw` and accept it only if the plate is complete.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRegistration` with the raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        let result = format_registration(raw);
        if !result.is_valid {
            return Err(ValidationError::InvalidRegistration(raw.to_string()));
        }
        Ok(Self(result.formatted_value))
    }

    /// Get the plate as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter state code.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// The registration series letters (one or two).
    pub fn series(&self) -> &str {
        let tail = &self.0[6..];
        let end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        &tail[..end]
    }
}

impl Serialize for VehicleRegistration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VehicleRegistration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        VehicleRegistration::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for VehicleRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
