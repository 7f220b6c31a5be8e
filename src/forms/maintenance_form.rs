use super::{optional_text, FieldChecker};
use crate::domain::{Money, RecordId};
use crate::error::FormResult;
use crate::formatter::FieldKind;
use crate::metrics::Metrics;
use crate::models::{MaintenanceTask, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::Deserialize;

/// Raw input for scheduling maintenance on a vehicle.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MaintenanceTaskForm {
    /// ID of the vehicle being serviced
    pub vehicle_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// low, medium, high or critical (default medium)
    #[serde(default)]
    pub priority: Option<String>,
    /// Due date as YYYY-MM-DD
    #[serde(default)]
    pub due_date: Option<String>,
    /// Estimated cost as typed
    #[serde(default)]
    pub estimated_cost: Option<String>,
}

impl MaintenanceTaskForm {
    pub fn into_record(self, metrics: &Metrics) -> FormResult<MaintenanceTask> {
        let mut checker = FieldChecker::new(metrics);

        let vehicle_id = match RecordId::new(self.vehicle_id.trim()) {
            Ok(id) => id.into_inner(),
            Err(e) => {
                checker.reject("vehicle_id", e.to_string());
                String::new()
            }
        };
        let title = checker.required("title", "Title", &self.title);
        let priority: TaskPriority = checker.parsed("priority", self.priority.as_deref());

        let due_date = optional_text(self.due_date).and_then(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| checker.reject("due_date", "Due date must be YYYY-MM-DD"))
                .ok()
        });

        let estimated_cost = optional_text(self.estimated_cost).map(|raw| {
            checker
                .value(
                    "estimated_cost",
                    "Estimated cost",
                    &raw,
                    FieldKind::CurrencyAmount,
                    "Enter a cost such as 4500",
                    Money::parse,
                )
                .unwrap_or_default()
                .amount()
        });

        checker.finish(MaintenanceTask {
            vehicle_id,
            title,
            description: optional_text(self.description),
            priority,
            status: TaskStatus::Pending,
            due_date,
            estimated_cost,
            ..Default::default()
        })
    }
}
