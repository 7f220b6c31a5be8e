use super::FieldChecker;
use crate::error::FormResult;
use crate::domain::{DriverLicense, PhoneNumber};
use crate::formatter::{find_profile, FieldKind};
use crate::metrics::Metrics;
use crate::models::{Driver, DriverStatus};
use schemars::JsonSchema;
use serde::Deserialize;

/// Raw input for registering a driver.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DriverForm {
    pub full_name: String,
    /// License number as typed, e.g. "mh1420110062821"
    pub license_number: String,
    /// Phone number as typed, with or without the dial code
    pub phone: String,
    /// ISO code of the phone's country, e.g. "AE"
    #[serde(default)]
    pub country_code: Option<String>,
    /// available, on_trip or off_duty (default available)
    #[serde(default)]
    pub status: Option<String>,
}

impl DriverForm {
    /// Build a new driver record. `default_country` is used when the form
    /// leaves the phone country unset.
    pub fn into_record(self, default_country: &str, metrics: &Metrics) -> FormResult<Driver> {
        let mut checker = FieldChecker::new(metrics);

        let full_name = checker.required("full_name", "Full name", &self.full_name);
        let license = checker.value(
            "license_number",
            "License number",
            &self.license_number,
            FieldKind::DriverLicense,
            "License number needs a 2-letter state code and 13 digits",
            |v| DriverLicense::new(v),
        );

        let country = self.country_code.as_deref().unwrap_or(default_country);
        let (phone, country_code) = match find_profile(country) {
            Some(profile) => {
                let phone = checker.value(
                    "phone",
                    "Phone number",
                    &self.phone,
                    FieldKind::PhoneNumber(profile),
                    &format!(
                        "{} numbers have {} digits after {}",
                        profile.name, profile.national_digit_limit, profile.dial_code
                    ),
                    |digits| PhoneNumber::with_profile(digits, profile),
                );
                (
                    phone.map(|p| p.to_string()).unwrap_or_default(),
                    profile.iso_code.to_string(),
                )
            }
            None => {
                checker.reject("country_code", format!("Unknown country code: {}", country));
                (String::new(), String::new())
            }
        };

        let status: DriverStatus = checker.parsed("status", self.status.as_deref());

        checker.finish(Driver {
            full_name,
            license_number: license.map(|l| l.to_string()).unwrap_or_default(),
            phone,
            country_code,
            status,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DriverForm {
        DriverForm {
            full_name: "Ravi Kumar".to_string(),
            license_number: "mh-14 2011 0062821".to_string(),
            phone: "+91 98765 43210".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_uses_default_country() {
        let driver = form().into_record("IN", &Metrics::new()).unwrap();
        assert_eq!(driver.license_number, "MH-1420110062821");
        assert_eq!(driver.phone, "+91 9876543210");
        assert_eq!(driver.country_code, "IN");
        assert_eq!(driver.status, DriverStatus::Available);
    }

    #[test]
    fn test_short_phone_for_selected_country() {
        let mut input = form();
        input.country_code = Some("ae".to_string());
        input.phone = "50 123 456".to_string();

        let err = input.into_record("IN", &Metrics::new()).unwrap_err();
        assert_eq!(err.issues()[0].field, "phone");
        assert!(err.issues()[0].message.contains("9 digits after +971"));
    }

    #[test]
    fn test_unknown_country() {
        let mut input = form();
        input.country_code = Some("ZZ".to_string());

        let err = input.into_record("IN", &Metrics::new()).unwrap_err();
        assert_eq!(err.issues()[0].field, "country_code");
    }

    #[test]
    fn test_missing_fields() {
        let err = DriverForm::default()
            .into_record("IN", &Metrics::new())
            .unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["full_name", "license_number", "phone"]);
        assert_eq!(err.issues()[2].message, "Phone number is required");
    }
}
