//! Error types for the Fleet MCP Server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when talking to the backend record store.
#[derive(Error, Debug)]
pub enum FleetApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Backend returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// One field a form refused to save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Form field name
    pub field: String,

    /// Message shown next to the field
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors produced when a form blocks a save.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// One or more fields are incomplete or malformed
    #[error("{} field(s) failed validation: {}", .0.len(), join_issues(.0))]
    Invalid(Vec<FieldIssue>),
}

impl FormError {
    /// The individual field issues.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::Invalid(issues) => issues,
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced by the tool layer.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Backend call failed
    #[error(transparent)]
    Api(#[from] FleetApiError),

    /// Form refused the input
    #[error(transparent)]
    Form(#[from] FormError),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Tool parameters are unusable
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for Results with FleetApiError
pub type FleetApiResult<T> = Result<T, FleetApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with FormError
pub type FormResult<T> = Result<T, FormError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FleetApiError::NotFound("vehicle".to_string());
        assert_eq!(err.to_string(), "Resource not found: vehicle");

        let err = ConfigError::MissingVar("FLEET_API_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: FLEET_API_KEY"
        );
    }

    #[test]
    fn test_api_error_variants() {
        let err = FleetApiError::ApiError {
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert!(err.to_string().contains("409"));
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_form_error_lists_issues() {
        let err = FormError::Invalid(vec![
            FieldIssue::new("registration_number", "Incomplete registration number"),
            FieldIssue::new("year", "Year out of range"),
        ]);
        assert_eq!(
            err.to_string(),
            "2 field(s) failed validation: registration_number: Incomplete registration number; year: Year out of range"
        );
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_service_error_is_transparent() {
        let err: ServiceError = FleetApiError::Unauthorized.into();
        assert_eq!(err.to_string(), "Authentication failed");
    }
}
