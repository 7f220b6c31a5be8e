//! PartNumber value object.

use super::errors::ValidationError;
use crate::formatter::part_number::format_part_number;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A cleaned, non-empty inventory part number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartNumber(String);

impl PartNumber {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPartNumber` when nothing survives cleaning.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();
        let result = format_part_number(raw);
        if !result.is_valid {
            return Err(ValidationError::InvalidPartNumber(raw.to_string()));
        }
        Ok(Self(result.formatted_value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for PartNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PartNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PartNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
