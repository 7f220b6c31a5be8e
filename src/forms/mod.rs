//! Record forms.
//!
//! A form takes the raw strings a user typed, runs each identifier field
//! through [`crate::formatter::format`] and builds a record only when every
//! field passes. All failing fields are reported together so the user can
//! fix them in one go.

mod driver_form;
mod maintenance_form;
mod part_form;
mod vehicle_form;

pub use driver_form::DriverForm;
pub use maintenance_form::MaintenanceTaskForm;
pub use part_form::PartForm;
pub use vehicle_form::VehicleForm;

use crate::domain::ValidationError;
use crate::error::{FieldIssue, FormError, FormResult};
use crate::formatter::{format, FieldKind};
use crate::metrics::Metrics;

/// Collects per-field issues while a form is being checked.
pub(crate) struct FieldChecker<'a> {
    issues: Vec<FieldIssue>,
    metrics: &'a Metrics,
}

impl<'a> FieldChecker<'a> {
    pub(crate) fn new(metrics: &'a Metrics) -> Self {
        Self {
            issues: Vec::new(),
            metrics,
        }
    }

    pub(crate) fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, message));
    }

    /// Trimmed text, or an issue when it is blank.
    pub(crate) fn required(&mut self, field: &str, label: &str, raw: &str) -> String {
        let value = raw.trim();
        if value.is_empty() {
            self.reject(field, format!("{} is required", label));
        }
        value.to_string()
    }

    /// Masked value for `kind`, or `None` once an issue is recorded.
    /// An empty field gets a "required" message, anything else that fails
    /// gets `message`.
    fn checked(
        &mut self,
        field: &str,
        label: &str,
        raw: &str,
        kind: FieldKind,
        message: &str,
    ) -> Option<String> {
        let result = format(raw, kind, "");
        self.metrics.record_field_formatted(result.is_valid);

        if result.is_valid {
            return Some(result.formatted_value);
        }
        if result.is_empty() {
            self.reject(field, format!("{} is required", label));
        } else {
            self.reject(field, message);
        }
        None
    }

    /// Mask a field and build its value object from the masked text.
    pub(crate) fn value<T>(
        &mut self,
        field: &str,
        label: &str,
        raw: &str,
        kind: FieldKind,
        message: &str,
        build: impl FnOnce(&str) -> Result<T, ValidationError>,
    ) -> Option<T> {
        let formatted = self.checked(field, label, raw, kind, message)?;
        match build(&formatted) {
            Ok(value) => Some(value),
            Err(e) => {
                self.reject(field, e.to_string());
                None
            }
        }
    }

    /// Parse an optional enum column, falling back to its default.
    pub(crate) fn parsed<T>(&mut self, field: &str, raw: Option<&str>) -> T
    where
        T: std::str::FromStr<Err = String> + Default,
    {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => T::default(),
            Some(text) => text.parse().unwrap_or_else(|e| {
                self.reject(field, e);
                T::default()
            }),
        }
    }

    /// A count that must not be negative.
    pub(crate) fn count(&mut self, field: &str, label: &str, raw: Option<i64>) -> u32 {
        match raw {
            None => 0,
            Some(n) if n < 0 => {
                self.reject(field, format!("{} cannot be negative", label));
                0
            }
            Some(n) => u32::try_from(n).unwrap_or_else(|_| {
                self.reject(field, format!("{} is too large", label));
                0
            }),
        }
    }

    /// `Ok(record)` when no issue was raised.
    pub(crate) fn finish<T>(self, record: T) -> FormResult<T> {
        if self.issues.is_empty() {
            Ok(record)
        } else {
            Err(FormError::Invalid(self.issues))
        }
    }
}

/// Trimmed optional text, `None` when blank.
pub(crate) fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
