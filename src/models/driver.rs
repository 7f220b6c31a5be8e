//! Driver record.

use super::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Duty status of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    #[default]
    Available,
    OnTrip,
    OffDuty,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnTrip => "on_trip",
            Self::OffDuty => "off_duty",
        }
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "on_trip" => Ok(Self::OnTrip),
            "off_duty" => Ok(Self::OffDuty),
            other => Err(format!("Unknown driver status: {}", other)),
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver employed by the fleet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Driver {
    pub id: String,

    pub full_name: String,

    /// Masked license number, e.g. `MH-1420110062821`
    pub license_number: String,

    /// Phone in display form, e.g. `+91 9876543210`
    pub phone: String,

    /// ISO code of the phone profile the number was entered with
    pub country_code: String,

    pub status: DriverStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Driver {
    const COLLECTION: &'static str = "drivers";

    fn id(&self) -> &str {
        &self.id
    }
}
