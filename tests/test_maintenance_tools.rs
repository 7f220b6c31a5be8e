mod mocks;

use chrono::NaiveDate;
use fleet_mcp_server::forms::MaintenanceTaskForm;
use fleet_mcp_server::models::{MaintenanceTask, TaskPriority, TaskStatus, Vehicle};
use fleet_mcp_server::tools::TaskFilter;
use fleet_mcp_server::{MaintenanceTools, Metrics, ServiceError};
use mocks::MockRepository;
use std::sync::Arc;

const VEHICLE_ID: &str = "0b6c2a3e-1d8f-4e5a-9c7b-2f1e0d9c8b7a";
const OTHER_VEHICLE_ID: &str = "5f0e3c1a-7b2d-4c8e-9a6f-1d2e3f4a5b6c";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn task(id: &str, vehicle: &str, due: Option<&str>, priority: TaskPriority, status: TaskStatus) -> MaintenanceTask {
    MaintenanceTask {
        id: id.to_string(),
        vehicle_id: vehicle.to_string(),
        title: format!("Task {}", id),
        due_date: due.map(date),
        priority,
        status,
        ..Default::default()
    }
}

fn setup() -> (MockRepository<MaintenanceTask>, MaintenanceTools) {
    let vehicles = MockRepository::new();
    vehicles.add(Vehicle {
        id: VEHICLE_ID.to_string(),
        registration_number: "MH-14-AB1234".to_string(),
        ..Default::default()
    });

    let tasks = MockRepository::new();
    tasks.add_all(vec![
        task("t1", VEHICLE_ID, Some("2024-06-10"), TaskPriority::Low, TaskStatus::Pending),
        task("t2", VEHICLE_ID, Some("2024-06-01"), TaskPriority::Medium, TaskStatus::InProgress),
        task("t3", VEHICLE_ID, Some("2024-06-01"), TaskPriority::Critical, TaskStatus::Pending),
        task("t4", OTHER_VEHICLE_ID, None, TaskPriority::High, TaskStatus::Pending),
        task("t5", VEHICLE_ID, Some("2024-05-01"), TaskPriority::High, TaskStatus::Completed),
    ]);

    let tools = MaintenanceTools::new(
        Arc::new(tasks.clone()),
        Arc::new(vehicles),
        Metrics::new(),
    );
    (tasks, tools)
}

#[tokio::test]
async fn test_create_task_for_existing_vehicle() {
    let (tasks, tools) = setup();

    let created = tools
        .create_task(MaintenanceTaskForm {
            vehicle_id: VEHICLE_ID.to_uppercase(),
            title: "Replace brake pads".to_string(),
            due_date: Some("2024-07-15".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.vehicle_id, VEHICLE_ID);
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(tasks.len(), 6);
}

#[tokio::test]
async fn test_create_task_for_unknown_vehicle() {
    let (tasks, tools) = setup();

    let result = tools
        .create_task(MaintenanceTaskForm {
            vehicle_id: OTHER_VEHICLE_ID.to_string(),
            title: "Oil change".to_string(),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(tasks.len(), 5);
}

#[tokio::test]
async fn test_list_tasks_sorted_by_due_date_then_priority() {
    let (_, tools) = setup();

    let tasks = tools
        .list_tasks_on(
            TaskFilter {
                vehicle_id: Some(VEHICLE_ID.to_string()),
                ..Default::default()
            },
            date("2024-06-05"),
        )
        .await
        .unwrap();

    let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t5", "t3", "t2", "t1"]);
}

#[tokio::test]
async fn test_list_overdue_tasks() {
    let (_, tools) = setup();

    let overdue = tools
        .list_tasks_on(
            TaskFilter {
                overdue_only: true,
                ..Default::default()
            },
            date("2024-06-05"),
        )
        .await
        .unwrap();

    // t5 is past due but completed
    let ids: Vec<_> = overdue.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t3", "t2"]);
}

#[tokio::test]
async fn test_list_tasks_by_status() {
    let (_, tools) = setup();

    let pending = tools
        .list_tasks(TaskFilter {
            status: Some("pending".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 3);
    assert_eq!(pending.last().map(|t| t.id.as_str()), Some("t4"));

    assert!(matches!(
        tools
            .list_tasks(TaskFilter {
                status: Some("paused".to_string()),
                ..Default::default()
            })
            .await,
        Err(ServiceError::InvalidParameters(_))
    ));
}

#[tokio::test]
async fn test_update_task_status() {
    let (_, tools) = setup();

    let task = tools.update_task_status("t1", "done").await.unwrap();
    assert_eq!(task.status, TaskStatus::Completed);

    // Closed tasks stay closed
    assert!(matches!(
        tools.update_task_status("t1", "pending").await,
        Err(ServiceError::InvalidParameters(_))
    ));

    // Same status is a no-op
    let task = tools.update_task_status("t5", "completed").await.unwrap();
    assert_eq!(task.status, TaskStatus::Completed);

    assert!(matches!(
        tools.update_task_status("nope", "pending").await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_vehicle_labels_skip_missing_vehicles() {
    let (tasks, tools) = setup();

    let labels = tools.vehicle_labels(&tasks.all()).await;

    assert_eq!(labels.len(), 1);
    assert_eq!(labels.get(VEHICLE_ID).map(String::as_str), Some("MH-14-AB1234"));
}

#[tokio::test]
async fn test_vehicle_labels_run_on_spawned_task() {
    let (tasks, tools) = setup();
    let tools = Arc::new(tools);
    let listed = tasks.all();

    let handle = tokio::spawn({
        let tools = tools.clone();
        async move { tools.vehicle_labels(&listed).await }
    });
    let labels = handle.await.unwrap();

    assert_eq!(labels.get(VEHICLE_ID).map(String::as_str), Some("MH-14-AB1234"));
    assert!(!labels.contains_key(OTHER_VEHICLE_ID));
}
