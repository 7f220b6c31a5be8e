//! Maintenance scheduling tools.

use crate::client::RowFilter;
use crate::error::{FleetApiError, ServiceError, ServiceResult};
use crate::forms::MaintenanceTaskForm;
use crate::metrics::Metrics;
use crate::models::{MaintenanceTask, TaskStatus, Vehicle};
use crate::repositories::Repository;
use chrono::{NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

/// Concurrent vehicle lookups when labelling task lists.
const LABEL_FETCH_CONCURRENCY: usize = 5;

/// Filters for [`MaintenanceTools::list_tasks`].
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub vehicle_id: Option<String>,
    pub status: Option<String>,

    /// Only open tasks past their due date
    pub overdue_only: bool,
}

/// Tools for maintenance tasks.
pub struct MaintenanceTools {
    task_repo: Arc<dyn Repository<MaintenanceTask>>,
    vehicle_repo: Arc<dyn Repository<Vehicle>>,
    metrics: Metrics,
}

impl MaintenanceTools {
    pub fn new(
        task_repo: Arc<dyn Repository<MaintenanceTask>>,
        vehicle_repo: Arc<dyn Repository<Vehicle>>,
        metrics: Metrics,
    ) -> Self {
        Self {
            task_repo,
            vehicle_repo,
            metrics,
        }
    }

    /// Validate the form and schedule a task against an existing vehicle.
    pub async fn create_task(&self, form: MaintenanceTaskForm) -> ServiceResult<MaintenanceTask> {
        let task = form.into_record(&self.metrics)?;

        self.vehicle_repo
            .get(&task.vehicle_id)
            .await
            .map_err(|e| not_found(e, "Vehicle", &task.vehicle_id))?;

        let created = self.task_repo.create(&task).await?;
        info!(id = %created.id, vehicle_id = %created.vehicle_id, "Maintenance task created");
        Ok(created)
    }

    /// Tasks matching `filter`, soonest due first; undated tasks go last,
    /// ties go to the more urgent task.
    pub async fn list_tasks(&self, filter: TaskFilter) -> ServiceResult<Vec<MaintenanceTask>> {
        self.list_tasks_on(filter, Utc::now().date_naive()).await
    }

    /// [`Self::list_tasks`] with an explicit date for overdue checks.
    pub async fn list_tasks_on(
        &self,
        filter: TaskFilter,
        today: NaiveDate,
    ) -> ServiceResult<Vec<MaintenanceTask>> {
        let mut rows = RowFilter::new();
        if let Some(vehicle_id) = filter.vehicle_id.as_deref() {
            rows = rows.eq("vehicle_id", vehicle_id);
        }
        if let Some(status) = filter.status.as_deref() {
            let status: TaskStatus = status.parse().map_err(ServiceError::InvalidParameters)?;
            rows = rows.eq("status", status.as_str());
        }

        let mut tasks = self.task_repo.list_all(&rows).await?;
        if filter.overdue_only {
            tasks.retain(|task| task.is_overdue(today));
        }
        tasks.sort_by(compare_tasks);
        Ok(tasks)
    }

    /// Vehicle labels (`MH-14-AB1234 (Tata Ace)`) keyed by vehicle ID for
    /// every vehicle `tasks` refer to.
    ///
    /// Vehicles are fetched concurrently; one that fails to load is left out
    /// rather than failing the listing.
    pub async fn vehicle_labels(&self, tasks: &[MaintenanceTask]) -> HashMap<String, String> {
        let ids: BTreeSet<String> = tasks.iter().map(|t| t.vehicle_id.clone()).collect();

        stream::iter(ids)
            .map(|id| {
                let vehicle_repo = self.vehicle_repo.clone();
                async move {
                    match vehicle_repo.get(&id).await {
                        Ok(vehicle) => Some((id, vehicle.label())),
                        Err(e) => {
                            warn!("Failed to fetch vehicle {}: {}", id, e);
                            None
                        }
                    }
                }
            })
            .buffer_unordered(LABEL_FETCH_CONCURRENCY)
            .filter_map(|label| async move { label })
            .collect()
            .await
    }

    /// Move a task to a new status. Closed tasks stay closed.
    pub async fn update_task_status(
        &self,
        task_id: &str,
        status: &str,
    ) -> ServiceResult<MaintenanceTask> {
        let status: TaskStatus = status.parse().map_err(ServiceError::InvalidParameters)?;
        let mut task = self
            .task_repo
            .get(task_id)
            .await
            .map_err(|e| not_found(e, "Task", task_id))?;

        if task.status == status {
            return Ok(task);
        }
        if !task.status.is_open() {
            return Err(ServiceError::InvalidParameters(format!(
                "Task {} is already {}",
                task_id, task.status
            )));
        }

        task.status = status;
        let saved = self.task_repo.update(task_id, &task).await?;
        info!(id = %task_id, status = %saved.status, "Task status updated");
        Ok(saved)
    }
}

fn not_found(error: FleetApiError, what: &str, id: &str) -> ServiceError {
    match error {
        FleetApiError::NotFound(_) => ServiceError::NotFound(format!("{} {}", what, id)),
        other => other.into(),
    }
}

fn compare_tasks(a: &MaintenanceTask, b: &MaintenanceTask) -> Ordering {
    let by_due = match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due.then_with(|| b.priority.cmp(&a.priority))
}
