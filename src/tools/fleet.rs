//! Vehicle and driver registration tools.

use crate::client::RowFilter;
use crate::error::{FieldIssue, FleetApiError, FormError, ServiceError, ServiceResult};
use crate::forms::{DriverForm, VehicleForm};
use crate::formatter::registration::format_registration;
use crate::metrics::Metrics;
use crate::models::{Driver, Vehicle, VehicleStatus};
use crate::repositories::Repository;
use std::sync::Arc;
use tracing::{debug, info};

/// Tools for the vehicle and driver registers.
pub struct FleetTools {
    vehicle_repo: Arc<dyn Repository<Vehicle>>,
    driver_repo: Arc<dyn Repository<Driver>>,
    metrics: Metrics,
    default_country: String,
}

impl FleetTools {
    pub fn new(
        vehicle_repo: Arc<dyn Repository<Vehicle>>,
        driver_repo: Arc<dyn Repository<Driver>>,
        metrics: Metrics,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_repo,
            driver_repo,
            metrics,
            default_country: default_country.into(),
        }
    }

    /// Validate the form and store a new vehicle.
    ///
    /// A registration number already on file is reported as a field issue.
    pub async fn register_vehicle(&self, form: VehicleForm) -> ServiceResult<Vehicle> {
        let vehicle = form.into_record(&self.metrics)?;

        let filter = RowFilter::new().eq("registration_number", &vehicle.registration_number);
        if !self.vehicle_repo.list(&filter, 1, 0).await?.is_empty() {
            return Err(FormError::Invalid(vec![FieldIssue::new(
                "registration_number",
                format!("{} is already registered", vehicle.registration_number),
            )])
            .into());
        }

        let created = self.vehicle_repo.create(&vehicle).await?;
        info!(id = %created.id, registration = %created.registration_number, "Vehicle registered");
        Ok(created)
    }

    /// Validate the form and store a new driver.
    pub async fn register_driver(&self, form: DriverForm) -> ServiceResult<Driver> {
        let driver = form.into_record(&self.default_country, &self.metrics)?;

        let filter = RowFilter::new().eq("license_number", &driver.license_number);
        if !self.driver_repo.list(&filter, 1, 0).await?.is_empty() {
            return Err(FormError::Invalid(vec![FieldIssue::new(
                "license_number",
                format!("{} belongs to another driver", driver.license_number),
            )])
            .into());
        }

        let created = self.driver_repo.create(&driver).await?;
        info!(id = %created.id, "Driver registered");
        Ok(created)
    }

    /// All vehicles, optionally with one status, sorted by registration.
    pub async fn list_vehicles(&self, status: Option<&str>) -> ServiceResult<Vec<Vehicle>> {
        let mut filter = RowFilter::new();
        if let Some(status) = status {
            let status: VehicleStatus = status.parse().map_err(ServiceError::InvalidParameters)?;
            filter = filter.eq("status", status.as_str());
        }

        let mut vehicles = self.vehicle_repo.list_all(&filter).await?;
        vehicles.sort_by(|a, b| a.registration_number.cmp(&b.registration_number));
        debug!(count = vehicles.len(), "Listed vehicles");
        Ok(vehicles)
    }

    /// Look a vehicle up by plate, however the plate was typed.
    pub async fn find_vehicle_by_registration(&self, query: &str) -> ServiceResult<Vehicle> {
        let formatted = format_registration(query);
        self.metrics.record_field_formatted(formatted.is_valid);
        if !formatted.is_valid {
            return Err(ServiceError::InvalidParameters(format!(
                "'{}' is not a complete registration number",
                query
            )));
        }

        let filter = RowFilter::new().eq("registration_number", &formatted.formatted_value);
        self.vehicle_repo
            .list(&filter, 1, 0)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound(format!("Vehicle {}", formatted.formatted_value)))
    }

    /// Fetch a vehicle by ID, mapping a missing row to `NotFound`.
    pub async fn get_vehicle(&self, id: &str) -> ServiceResult<Vehicle> {
        self.vehicle_repo.get(id).await.map_err(|e| match e {
            FleetApiError::NotFound(_) => ServiceError::NotFound(format!("Vehicle {}", id)),
            other => other.into(),
        })
    }
}
