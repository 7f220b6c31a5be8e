//! Vehicle record.

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body type of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    #[default]
    Truck,
    Van,
    Car,
    Bus,
    Motorcycle,
    Other,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truck => "truck",
            Self::Van => "van",
            Self::Car => "car",
            Self::Bus => "bus",
            Self::Motorcycle => "motorcycle",
            Self::Other => "other",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truck" => Ok(Self::Truck),
            "van" => Ok(Self::Van),
            "car" => Ok(Self::Car),
            "bus" => Ok(Self::Bus),
            "motorcycle" | "bike" => Ok(Self::Motorcycle),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown vehicle type: {}", other)),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    #[default]
    Active,
    InMaintenance,
    Inactive,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InMaintenance => "in_maintenance",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "in_maintenance" | "maintenance" => Ok(Self::InMaintenance),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown vehicle status: {}", other)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle in the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Vehicle {
    /// Backend row ID (UUID)
    pub id: String,

    /// Masked registration plate, e.g. `MH-14-AB1234`
    pub registration_number: String,

    pub make: String,

    pub model: String,

    /// Model year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    pub vehicle_type: VehicleType,

    pub status: VehicleStatus,

    /// Odometer reading in kilometres
    pub odometer_km: u64,

    /// Driver currently assigned, if any
    pub assigned_driver_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Short label used in listings, e.g. `MH-14-AB1234 (Tata Ace)`.
    pub fn label(&self) -> String {
        let name = format!("{} {}", self.make, self.model);
        let name = name.trim();
        if name.is_empty() {
            self.registration_number.clone()
        } else {
            format!("{} ({})", self.registration_number, name)
        }
    }
}

impl Record for Vehicle {
    const COLLECTION: &'static str = "vehicles";

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_deserialization() {
        let json = r#"{
            "id": "0b6c2a3e-1d8f-4e5a-9c7b-2f1e0d9c8b7a",
            "registration_number": "MH-14-AB1234",
            "make": "Tata",
            "model": "Ace",
            "year": 2021,
            "vehicle_type": "van",
            "status": "in_maintenance",
            "odometer_km": 48210,
            "assigned_driver_id": null,
            "created_at": "2024-03-01T09:30:00+00:00"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.vehicle_type, VehicleType::Van);
        assert_eq!(vehicle.status, VehicleStatus::InMaintenance);
        assert_eq!(vehicle.year, Some(2021));
        assert!(vehicle.created_at.is_some());
        assert_eq!(vehicle.label(), "MH-14-AB1234 (Tata Ace)");
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Bike".parse::<VehicleType>().unwrap(), VehicleType::Motorcycle);
        assert_eq!(
            "maintenance".parse::<VehicleStatus>().unwrap(),
            VehicleStatus::InMaintenance
        );
        assert!("hovercraft".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_label_without_make() {
        let vehicle = Vehicle {
            registration_number: "KA-01-M0001".to_string(),
            ..Default::default()
        };
        assert_eq!(vehicle.label(), "KA-01-M0001");
    }
}
