//! Field formatting tools.
//!
//! Expose the formatter to clients that render their own forms: every
//! keystroke is sent here with the field kind and the previous value.

use crate::error::{ServiceError, ServiceResult};
use crate::formatter::{self, find_profile, CountryPhoneProfile, FieldKind, ValidationResult};
use crate::formatter::COUNTRY_PROFILES;
use crate::metrics::Metrics;
use serde::Serialize;

/// Formatting tools for single form fields.
#[derive(Clone)]
pub struct FieldTools {
    metrics: Metrics,
    default_country: &'static CountryPhoneProfile,
}

/// A formatted field together with the kind it was formatted as.
#[derive(Debug, Clone, Serialize)]
pub struct FormatFieldResponse {
    /// Kind name, e.g. `vehicle_registration`
    pub kind: String,

    /// ISO code of the phone profile, phone fields only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    #[serde(flatten)]
    pub result: ValidationResult,
}

impl FieldTools {
    /// Create field tools. An unknown `default_country` falls back to the
    /// first profile in the table.
    pub fn new(metrics: Metrics, default_country: &str) -> Self {
        let default_country =
            find_profile(default_country).unwrap_or_else(formatter::default_profile);
        Self {
            metrics,
            default_country,
        }
    }

    fn resolve_profile(
        &self,
        country_code: Option<&str>,
    ) -> ServiceResult<&'static CountryPhoneProfile> {
        match country_code {
            None => Ok(self.default_country),
            Some(code) => find_profile(code).ok_or_else(|| {
                ServiceError::InvalidParameters(format!("Unknown country code: {}", code))
            }),
        }
    }

    /// Format one keystroke's worth of input for the named kind.
    pub fn format_field(
        &self,
        kind: &str,
        raw_input: &str,
        previous_value: Option<&str>,
        country_code: Option<&str>,
    ) -> ServiceResult<FormatFieldResponse> {
        let profile = self.resolve_profile(country_code)?;
        let kind = FieldKind::from_name(kind, Some(profile))
            .ok_or_else(|| ServiceError::InvalidParameters(format!("Unknown field kind: {}", kind)))?;

        let result = formatter::format(raw_input, kind, previous_value.unwrap_or(""));
        self.metrics.record_field_formatted(result.is_valid);
        tracing::debug!(kind = %kind, valid = result.is_valid, "Formatted field");

        let country_code = match kind {
            FieldKind::PhoneNumber(profile) => Some(profile.iso_code.to_string()),
            _ => None,
        };

        Ok(FormatFieldResponse {
            kind: kind.name().to_string(),
            country_code,
            result,
        })
    }

    /// Keep the digits already typed when the user picks another country.
    pub fn switch_phone_profile(
        &self,
        current_digits: &str,
        country_code: &str,
    ) -> ServiceResult<FormatFieldResponse> {
        let profile = self.resolve_profile(Some(country_code))?;
        let result = formatter::switch_phone_profile(current_digits, profile);
        self.metrics.record_field_formatted(result.is_valid);

        Ok(FormatFieldResponse {
            kind: FieldKind::PhoneNumber(profile).name().to_string(),
            country_code: Some(profile.iso_code.to_string()),
            result,
        })
    }

    /// All supported phone profiles in picker order.
    pub fn list_country_profiles(&self) -> &'static [CountryPhoneProfile] {
        COUNTRY_PROFILES
    }

    pub fn default_country(&self) -> &'static CountryPhoneProfile {
        self.default_country
    }
}
