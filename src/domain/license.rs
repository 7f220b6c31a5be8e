//! DriverLicense value object.

use super::errors::ValidationError;
use crate::formatter::license::format_license;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A complete driver license number, `LL-` plus 13 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DriverLicense(String);

impl DriverLicense {
    /// Mask `raw` and accept it only if the number is complete.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidLicense` with the raw input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        let result = format_license(raw);
        if !result.is_valid {
            return Err(ValidationError::InvalidLicense(raw.to_string()));
        }
        Ok(Self(result.formatted_value))
    }

    /// Get the license number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The issuing state code.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }
}

impl Serialize for DriverLicense {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DriverLicense {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DriverLicense::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for DriverLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_valid() {
        let license = DriverLicense::new("mh1420110062821").unwrap();
        assert_eq!(license.as_str(), "MH-1420110062821");
        assert_eq!(license.state_code(), "MH");
    }

    #[test]
    fn test_license_invalid() {
        assert!(DriverLicense::new("MH-14201100").is_err());
        assert!(DriverLicense::new("121420110062821").is_err());
    }
}
