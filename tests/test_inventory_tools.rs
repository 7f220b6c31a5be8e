mod mocks;

use fleet_mcp_server::forms::PartForm;
use fleet_mcp_server::matching::MatchType;
use fleet_mcp_server::models::InventoryPart;
use fleet_mcp_server::tools::SearchDefaults;
use fleet_mcp_server::{InventoryTools, Metrics, ServiceError};
use mocks::MockRepository;
use std::sync::Arc;

fn part(id: &str, part_number: &str, name: &str, quantity: u32, min: u32) -> InventoryPart {
    InventoryPart {
        id: id.to_string(),
        part_number: part_number.to_string(),
        name: name.to_string(),
        quantity,
        min_stock_level: min,
        ..Default::default()
    }
}

fn setup() -> (MockRepository<InventoryPart>, Metrics, InventoryTools) {
    let repo = MockRepository::new();
    repo.add_all(vec![
        part("p1", "BRK0042", "Brake Pad Set", 12, 4),
        part("p2", "FLT0007", "Oil Filter", 2, 5),
        part("p3", "FLT0008", "Air Filter", 0, 3),
    ]);
    let metrics = Metrics::new();
    let tools = InventoryTools::new(
        Arc::new(repo.clone()),
        metrics.clone(),
        600,
        SearchDefaults::default(),
    );
    (repo, metrics, tools)
}

#[tokio::test]
async fn test_search_by_part_number() {
    let (_, _, tools) = setup();

    let response = tools.search_parts("brk-0042", None, None).await.unwrap();

    assert_eq!(response.matches.len(), 1);
    assert_eq!(response.matches[0].part.id, "p1");
    assert_eq!(response.matches[0].confidence, 100);
    assert_eq!(response.matches[0].match_type, MatchType::ExactPartNumber);
}

#[tokio::test]
async fn test_search_uses_cached_snapshot() {
    let (repo, metrics, tools) = setup();

    let first = tools.search_parts("filter", None, None).await.unwrap();
    let second = tools.search_parts("oil filter", None, None).await.unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(second.matches[0].part.part_number, "FLT0007");
    assert_eq!(repo.get_call_count("list"), 1);
    assert_eq!(metrics.cache_hit_rate(), 0.5);
}

#[tokio::test]
async fn test_writes_invalidate_snapshot() {
    let (repo, _, tools) = setup();
    tools.search_parts("filter", None, None).await.unwrap();

    tools
        .add_part(PartForm {
            part_number: "flt-0009".to_string(),
            name: "Fuel Filter".to_string(),
            quantity: Some(6),
            unit_price: "780".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let response = tools.search_parts("filter", Some(10), None).await.unwrap();
    assert!(!response.from_cache);
    assert_eq!(response.matches.len(), 3);
    assert_eq!(repo.len(), 4);
}

#[tokio::test]
async fn test_add_part_rejects_duplicate_part_number() {
    let (_, _, tools) = setup();

    let result = tools
        .add_part(PartForm {
            part_number: "BRK 0042".to_string(),
            name: "Brake Pad Set".to_string(),
            unit_price: "450".to_string(),
            ..Default::default()
        })
        .await;

    match result {
        Err(ServiceError::Form(err)) => assert_eq!(err.issues()[0].field, "part_number"),
        other => panic!("expected form error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_adjust_stock_never_goes_negative() {
    let (repo, _, tools) = setup();

    let updated = tools.adjust_stock("p2", 8).await.unwrap();
    assert_eq!(updated.quantity, 10);

    let updated = tools.adjust_stock("p2", -10).await.unwrap();
    assert_eq!(updated.quantity, 0);

    let result = tools.adjust_stock("p2", -1).await;
    assert!(matches!(result, Err(ServiceError::InvalidParameters(_))));
    assert_eq!(repo.get_call_count("update"), 2);

    assert!(matches!(
        tools.adjust_stock("missing", 1).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_low_stock_parts_emptiest_first() {
    let (_, _, tools) = setup();

    let low = tools.low_stock_parts().await.unwrap();
    let numbers: Vec<_> = low.iter().map(|p| p.part_number.as_str()).collect();
    assert_eq!(numbers, ["FLT0008", "FLT0007"]);
}

#[tokio::test]
async fn test_search_parameter_validation() {
    let (_, _, tools) = setup();

    assert!(matches!(
        tools.search_parts("  ", None, None).await,
        Err(ServiceError::InvalidParameters(_))
    ));
    assert!(matches!(
        tools.search_parts("filter", None, Some(101)).await,
        Err(ServiceError::InvalidParameters(_))
    ));
}

#[tokio::test]
async fn test_remove_part_only_when_out_of_stock() {
    let (repo, _, tools) = setup();
    tools.search_parts("filter", None, None).await.unwrap();

    assert!(matches!(
        tools.remove_part("p2").await,
        Err(ServiceError::InvalidParameters(_))
    ));
    assert_eq!(repo.get_call_count("delete"), 0);

    let removed = tools.remove_part("p3").await.unwrap();
    assert_eq!(removed.part_number, "FLT0008");
    assert_eq!(repo.len(), 2);

    let response = tools.search_parts("filter", Some(10), None).await.unwrap();
    assert!(!response.from_cache);
    assert!(response.matches.iter().all(|m| m.part.id != "p3"));

    assert!(matches!(
        tools.remove_part("p3").await,
        Err(ServiceError::NotFound(_))
    ));
}
