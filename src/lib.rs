//! Fleet MCP Server - identifier formatting and fleet records over the Model Context Protocol.
//!
//! The core is [`formatter`]: a pure, per-keystroke mask and validator for
//! vehicle registrations, driver licenses, country-bounded phone numbers,
//! part numbers and currency amounts. Around it sit the record forms that
//! refuse to save invalid input and an MCP server that manages vehicles,
//! drivers, parts inventory and maintenance tasks in a hosted backend.
//!
//! # Architecture
//!
//! - **formatter**: Input masks and validity checks
//! - **domain**: Validated value objects built on the formatter
//! - **models**: Backend records
//! - **forms**: Raw input to records, collecting every field issue
//! - **client**: HTTP client for the backend REST API
//! - **repositories**: Typed record storage behind a trait
//! - **matching**: Fuzzy part search
//! - **cache**: TTL cache for the inventory snapshot
//! - **tools**: MCP tool implementations
//! - **server**: MCP protocol server

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod forms;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod tools;

pub use cache::TimedCache;
pub use client::FleetClient;
pub use config::Config;
pub use error::{ConfigError, FieldIssue, FleetApiError, FormError, ServiceError};
pub use formatter::{format, switch_phone_profile, FieldKind, ValidationResult};
pub use matching::{PartMatch, PartMatcher};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Driver, InventoryPart, MaintenanceTask, Vehicle};
pub use server::FleetMcpServer;
pub use tools::{FieldTools, FleetTools, InventoryTools, MaintenanceTools};
