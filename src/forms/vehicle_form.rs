use super::FieldChecker;
use crate::domain::VehicleRegistration;
use crate::error::FormResult;
use crate::formatter::FieldKind;
use crate::metrics::Metrics;
use crate::models::{Vehicle, VehicleStatus, VehicleType};
use chrono::{Datelike, Utc};
use schemars::JsonSchema;
use serde::Deserialize;

/// Oldest model year the depot still registers.
const MIN_MODEL_YEAR: i32 = 1950;

/// Raw input for registering a vehicle.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct VehicleForm {
    /// Registration plate as typed, e.g. "mh14ab1234"
    pub registration_number: String,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    /// truck, van, car, bus, motorcycle or other (default truck)
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// active, in_maintenance or inactive (default active)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub odometer_km: Option<u64>,
}

impl VehicleForm {
    /// Build a new vehicle record or report every field that blocks saving.
    pub fn into_record(self, metrics: &Metrics) -> FormResult<Vehicle> {
        let mut checker = FieldChecker::new(metrics);

        let registration = checker.value(
            "registration_number",
            "Registration number",
            &self.registration_number,
            FieldKind::VehicleRegistration,
            "Enter a complete registration number, e.g. MH-14-AB1234",
            |v| VehicleRegistration::new(v),
        );
        let make = checker.required("make", "Make", &self.make);
        let model = checker.required("model", "Model", &self.model);

        let latest_year = Utc::now().year() + 1;
        if let Some(year) = self.year {
            if !(MIN_MODEL_YEAR..=latest_year).contains(&year) {
                checker.reject(
                    "year",
                    format!("Year must be between {} and {}", MIN_MODEL_YEAR, latest_year),
                );
            }
        }

        let vehicle_type: VehicleType = checker.parsed("vehicle_type", self.vehicle_type.as_deref());
        let status: VehicleStatus = checker.parsed("status", self.status.as_deref());

        checker.finish(Vehicle {
            registration_number: registration.map(|p| p.to_string()).unwrap_or_default(),
            make,
            model,
            year: self.year,
            vehicle_type,
            status,
            odometer_km: self.odometer_km.unwrap_or(0),
            ..Default::default()
        })
    }
}
