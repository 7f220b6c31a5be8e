//! Fleet tools exposed over MCP.
//!
//! - **Fields**: format single inputs as they are typed
//! - **Fleet**: register and look up vehicles and drivers
//! - **Inventory**: parts stock and search
//! - **Maintenance**: schedule and track service tasks

pub mod fields;
pub mod fleet;
pub mod inventory;
pub mod maintenance;

pub use fields::{FieldTools, FormatFieldResponse};
pub use fleet::FleetTools;
pub use inventory::{InventoryTools, SearchDefaults, SearchPartsResponse};
pub use maintenance::{MaintenanceTools, TaskFilter};
