//! Fleet records as stored by the backend.
//!
//! Records are plain rows owned by the backend: `id`, `created_at` and
//! `updated_at` are assigned server-side and stripped from write payloads.

pub mod driver;
pub mod inventory_part;
pub mod maintenance_task;
pub mod vehicle;

pub use driver::{Driver, DriverStatus};
pub use inventory_part::InventoryPart;
pub use maintenance_task::{MaintenanceTask, TaskPriority, TaskStatus};
pub use vehicle::{Vehicle, VehicleStatus, VehicleType};

use crate::error::FleetApiResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Columns the backend fills in itself.
const SERVER_ASSIGNED: [&str; 3] = ["id", "created_at", "updated_at"];

/// A row type stored in a backend collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Backend collection (table) name.
    const COLLECTION: &'static str;

    /// Row ID; empty until the backend assigns one.
    fn id(&self) -> &str;

    /// JSON body for insert/update requests, without server-assigned columns.
    fn to_payload(&self) -> FleetApiResult<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            for column in SERVER_ASSIGNED {
                object.remove(column);
            }
        }
        Ok(value)
    }
}
