//! RecordId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// A type-safe wrapper for backend row IDs.
///
/// Rows are keyed by UUID; the canonical hyphenated lowercase form is kept.
///
/// # Example
///
/// ```
/// use fleet_mcp_server::domain::RecordId;
///
/// let id = RecordId::new("6F9619FF-8B86-D011-B42D-00CF4FC964FF").unwrap();
/// assert_eq!(id.as_str(), "6f9619ff-8b86-d011-b42d-00cf4fc964ff");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId, validating that it's a UUID.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` for empty input and
    /// `ValidationError::InvalidId` when it doesn't parse.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }

        let uuid = Uuid::parse_str(trimmed).map_err(|_| ValidationError::InvalidId(id.clone()))?;
        Ok(Self(uuid.hyphenated().to_string()))
    }

    /// Generate a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().hyphenated().to_string())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_valid() {
        let id = RecordId::new("0b6c2a3e-1d8f-4e5a-9c7b-2f1e0d9c8b7a").unwrap();
        assert_eq!(id.as_str(), "0b6c2a3e-1d8f-4e5a-9c7b-2f1e0d9c8b7a");
    }

    #[test]
    fn test_record_id_rejects_empty() {
        assert_eq!(RecordId::new("  "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_record_id_rejects_non_uuid() {
        assert!(matches!(
            RecordId::new("vehicle_123"),
            Err(ValidationError::InvalidId(_))
        ));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn test_record_id_deserialization_invalid_fails() {
        let result: Result<RecordId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
