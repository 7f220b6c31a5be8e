//! MCP tool handlers for the fleet server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::config::Config;
use crate::error::ServiceError;
use crate::forms::{DriverForm, MaintenanceTaskForm, PartForm, VehicleForm};
use crate::metrics::Metrics;
use crate::models::{Driver, InventoryPart, MaintenanceTask, Vehicle};
use crate::repositories::Repository;
use crate::tools::{
    FieldTools, FleetTools, InventoryTools, MaintenanceTools, SearchDefaults, TaskFilter,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// Repositories the server's tools read and write.
#[derive(Clone)]
pub struct FleetRepositories {
    pub vehicles: Arc<dyn Repository<Vehicle>>,
    pub drivers: Arc<dyn Repository<Driver>>,
    pub parts: Arc<dyn Repository<InventoryPart>>,
    pub tasks: Arc<dyn Repository<MaintenanceTask>>,
}

/// Tunables taken from [`Config`].
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub cache_ttl_secs: u64,
    pub search: SearchDefaults,
    pub default_country: String,
}

impl ServerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache_ttl_secs: config.cache_ttl_secs(),
            search: SearchDefaults {
                max_results: config.max_match_results,
                min_confidence: config.match_confidence_threshold,
            },
            default_country: config.default_country_code.clone(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 30 * 60,
            search: SearchDefaults::default(),
            default_country: "IN".to_string(),
        }
    }
}

/// The fleet MCP server.
#[derive(Clone)]
pub struct FleetMcpServer {
    field_tools: Arc<FieldTools>,
    fleet_tools: Arc<FleetTools>,
    inventory_tools: Arc<InventoryTools>,
    maintenance_tools: Arc<MaintenanceTools>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for FleetMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "fleet-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for fleet management - formats and validates vehicle registrations, driver licenses, phone numbers, part numbers and amounts, and manages vehicles, drivers, parts inventory and maintenance tasks.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct FormatFieldParams {
    /// vehicle_registration, driver_license, phone_number, part_number or currency_amount
    kind: String,
    /// Current raw text of the field
    value: String,
    /// Field value before this edit
    #[serde(default)]
    previous_value: Option<String>,
    /// Phone profile ISO code, phone fields only
    #[serde(default)]
    country_code: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SwitchPhoneProfileParams {
    current_digits: String,
    country_code: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListVehiclesParams {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RegistrationParams {
    registration_number: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AdjustStockParams {
    part_id: String,
    /// Units to add; negative to issue stock
    delta: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PartIdParams {
    part_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchPartsParams {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
    #[serde(default)]
    min_confidence: Option<u8>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListTasksParams {
    #[serde(default)]
    vehicle_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    overdue_only: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdateTaskStatusParams {
    task_id: String,
    /// pending, in_progress, completed or cancelled
    status: String,
}

fn mcp_error(code: ErrorCode, message: String, data: Option<serde_json::Value>) -> McpError {
    McpError {
        code,
        message: Cow::from(message),
        data,
    }
}

/// Map a tool failure to an MCP error.
///
/// Form failures list every field issue in `data` so clients can mark
/// each field.
pub(crate) fn to_mcp_error(e: ServiceError) -> McpError {
    match &e {
        ServiceError::Form(form) => {
            let data = serde_json::json!({ "issues": form.issues() });
            mcp_error(ErrorCode::INVALID_PARAMS, e.to_string(), Some(data))
        }
        ServiceError::InvalidParameters(_) => {
            mcp_error(ErrorCode::INVALID_PARAMS, e.to_string(), None)
        }
        ServiceError::NotFound(_) => mcp_error(ErrorCode::RESOURCE_NOT_FOUND, e.to_string(), None),
        ServiceError::Api(api) => {
            tracing::error!("Backend call failed: {}", api);
            mcp_error(ErrorCode::INTERNAL_ERROR, e.to_string(), None)
        }
    }
}

fn to_internal_error(e: impl std::fmt::Display) -> McpError {
    mcp_error(ErrorCode::INTERNAL_ERROR, e.to_string(), None)
}

fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let body = serde_json::to_string_pretty(value).map_err(to_internal_error)?;
    Ok(CallToolResult::success(vec![Content::text(body)]))
}

#[tool_router]
impl FleetMcpServer {
    /// Create a new fleet MCP server.
    pub fn new(repos: FleetRepositories, metrics: Metrics, settings: ServerSettings) -> Self {
        let field_tools = Arc::new(FieldTools::new(metrics.clone(), &settings.default_country));

        let fleet_tools = Arc::new(FleetTools::new(
            repos.vehicles.clone(),
            repos.drivers,
            metrics.clone(),
            settings.default_country.clone(),
        ));

        let inventory_tools = Arc::new(InventoryTools::new(
            repos.parts,
            metrics.clone(),
            settings.cache_ttl_secs,
            settings.search,
        ));

        let maintenance_tools = Arc::new(MaintenanceTools::new(
            repos.tasks,
            repos.vehicles,
            metrics.clone(),
        ));

        Self {
            field_tools,
            fleet_tools,
            inventory_tools,
            maintenance_tools,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// Format one field value as it is typed.
    #[tool(
        description = "Format and validate a form field as it is typed. Kinds: vehicle_registration (MH-14-AB1234), driver_license (MH-1420110062821), phone_number (needs country_code, defaults to the server's country), part_number, currency_amount. Pass the field's previous value so backspacing over an inserted hyphen works."
    )]
    async fn format_field(
        &self,
        params: Parameters<FormatFieldParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .field_tools
            .format_field(
                &params.kind,
                &params.value,
                params.previous_value.as_deref(),
                params.country_code.as_deref(),
            )
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(
        description = "Re-bound already entered phone digits after switching country. Digits beyond the new country's limit are dropped; nothing else is cleared."
    )]
    async fn switch_phone_profile(
        &self,
        params: Parameters<SwitchPhoneProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .field_tools
            .switch_phone_profile(&params.current_digits, &params.country_code)
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(description = "List supported phone country profiles with dial codes and digit counts")]
    async fn list_country_profiles(&self) -> Result<CallToolResult, McpError> {
        json_result(self.field_tools.list_country_profiles())
    }

    /// Register a new vehicle.
    #[tool(
        description = "Register a vehicle. The registration number is formatted and must be complete; every invalid field is reported at once."
    )]
    async fn register_vehicle(
        &self,
        params: Parameters<VehicleForm>,
    ) -> Result<CallToolResult, McpError> {
        let vehicle = self
            .fleet_tools
            .register_vehicle(params.0)
            .await
            .map_err(to_mcp_error)?;

        json_result(&vehicle)
    }

    #[tool(description = "Register a driver with license number and phone number")]
    async fn register_driver(
        &self,
        params: Parameters<DriverForm>,
    ) -> Result<CallToolResult, McpError> {
        let driver = self
            .fleet_tools
            .register_driver(params.0)
            .await
            .map_err(to_mcp_error)?;

        json_result(&driver)
    }

    #[tool(
        description = "List vehicles sorted by registration number, optionally filtered by status (active, in_maintenance, inactive)"
    )]
    async fn list_vehicles(
        &self,
        params: Parameters<ListVehiclesParams>,
    ) -> Result<CallToolResult, McpError> {
        let vehicles = self
            .fleet_tools
            .list_vehicles(params.0.status.as_deref())
            .await
            .map_err(to_mcp_error)?;

        json_result(&serde_json::json!({
            "count": vehicles.len(),
            "vehicles": vehicles,
        }))
    }

    #[tool(
        description = "Find a vehicle by registration number, typed in any format (e.g. 'mh 14 ab 1234')"
    )]
    async fn find_vehicle_by_registration(
        &self,
        params: Parameters<RegistrationParams>,
    ) -> Result<CallToolResult, McpError> {
        let vehicle = self
            .fleet_tools
            .find_vehicle_by_registration(&params.0.registration_number)
            .await
            .map_err(to_mcp_error)?;

        json_result(&vehicle)
    }

    #[tool(description = "Add a part to inventory")]
    async fn add_part(&self, params: Parameters<PartForm>) -> Result<CallToolResult, McpError> {
        let part = self
            .inventory_tools
            .add_part(params.0)
            .await
            .map_err(to_mcp_error)?;

        json_result(&part)
    }

    #[tool(
        description = "Adjust a part's stock by a signed number of units. Stock never drops below zero."
    )]
    async fn adjust_stock(
        &self,
        params: Parameters<AdjustStockParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let part = self
            .inventory_tools
            .adjust_stock(&params.part_id, params.delta)
            .await
            .map_err(to_mcp_error)?;

        json_result(&part)
    }

    #[tool(description = "Remove a discontinued part from inventory. Its stock must be zero.")]
    async fn remove_part(
        &self,
        params: Parameters<PartIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let part = self
            .inventory_tools
            .remove_part(&params.0.part_id)
            .await
            .map_err(to_mcp_error)?;

        json_result(&part)
    }

    #[tool(
        description = "Search inventory by exact part number or fuzzy part name. Returns ranked matches with confidence scores (100 = exact part number)."
    )]
    async fn search_parts(
        &self,
        params: Parameters<SearchPartsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .inventory_tools
            .search_parts(&params.query, params.max_results, params.min_confidence)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    #[tool(description = "List parts at or below their minimum stock level")]
    async fn low_stock_parts(&self) -> Result<CallToolResult, McpError> {
        let parts = self
            .inventory_tools
            .low_stock_parts()
            .await
            .map_err(to_mcp_error)?;

        json_result(&parts)
    }

    #[tool(description = "Schedule a maintenance task for a vehicle. Due date format: YYYY-MM-DD.")]
    async fn create_task(
        &self,
        params: Parameters<MaintenanceTaskForm>,
    ) -> Result<CallToolResult, McpError> {
        let task = self
            .maintenance_tools
            .create_task(params.0)
            .await
            .map_err(to_mcp_error)?;

        json_result(&task)
    }

    #[tool(
        description = "List maintenance tasks by vehicle, status or overdue state, soonest due first"
    )]
    async fn list_tasks(
        &self,
        params: Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let tasks = self
            .maintenance_tools
            .list_tasks(TaskFilter {
                vehicle_id: params.vehicle_id,
                status: params.status,
                overdue_only: params.overdue_only.unwrap_or(false),
            })
            .await
            .map_err(to_mcp_error)?;
        let labels = self.maintenance_tools.vehicle_labels(&tasks).await;

        json_result(&serde_json::json!({
            "count": tasks.len(),
            "tasks": tasks.iter().map(|task| {
                serde_json::json!({
                    "task": task,
                    "vehicle": labels.get(&task.vehicle_id),
                })
            }).collect::<Vec<_>>(),
        }))
    }

    #[tool(description = "Change a maintenance task's status. Completed or cancelled tasks cannot be reopened.")]
    async fn update_task_status(
        &self,
        params: Parameters<UpdateTaskStatusParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::debug!(task_id = %params.task_id, status = %params.status, "update_task_status called");

        let task = self
            .maintenance_tools
            .update_task_status(&params.task_id, &params.status)
            .await
            .map_err(to_mcp_error)?;

        json_result(&task)
    }

    #[tool(description = "Report request, cache and field validation counters")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.metrics.summary())
    }
}
