//! Async wrapper around the synchronous FleetClient.
//!
//! This module provides an async interface to the synchronous FleetClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::{FleetClient, RowFilter};
use crate::error::{FleetApiError, FleetApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async row-level access to the backend.
///
/// Rows travel as JSON; typed conversion happens in the repositories.
#[async_trait]
pub trait AsyncFleetClient: Send + Sync {
    async fn list_rows(
        &self,
        collection: &str,
        filter: &RowFilter,
        limit: usize,
        offset: usize,
    ) -> FleetApiResult<Vec<Value>>;

    async fn get_row(&self, collection: &str, id: &str) -> FleetApiResult<Value>;

    async fn insert_row(&self, collection: &str, row: &Value) -> FleetApiResult<Value>;

    async fn update_row(&self, collection: &str, id: &str, changes: &Value)
        -> FleetApiResult<Value>;

    async fn delete_row(&self, collection: &str, id: &str) -> FleetApiResult<()>;
}

/// Async wrapper around synchronous FleetClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncFleetClientImpl {
    client: Arc<FleetClient>,
}

impl AsyncFleetClientImpl {
    pub fn new(client: FleetClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> FleetApiError {
    FleetApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncFleetClient for AsyncFleetClientImpl {
    async fn list_rows(
        &self,
        collection: &str,
        filter: &RowFilter,
        limit: usize,
        offset: usize,
    ) -> FleetApiResult<Vec<Value>> {
        let client = self.client.clone();
        let collection = collection.to_string();
        let filter = filter.clone();

        tokio::task::spawn_blocking(move || client.list_rows(&collection, &filter, limit, offset))
            .await
            .map_err(join_error)?
    }

    async fn get_row(&self, collection: &str, id: &str) -> FleetApiResult<Value> {
        let client = self.client.clone();
        let collection = collection.to_string();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.get_row(&collection, &id))
            .await
            .map_err(join_error)?
    }

    async fn insert_row(&self, collection: &str, row: &Value) -> FleetApiResult<Value> {
        let client = self.client.clone();
        let collection = collection.to_string();
        let row = row.clone();

        tokio::task::spawn_blocking(move || client.insert_row(&collection, &row))
            .await
            .map_err(join_error)?
    }

    async fn update_row(
        &self,
        collection: &str,
        id: &str,
        changes: &Value,
    ) -> FleetApiResult<Value> {
        let client = self.client.clone();
        let collection = collection.to_string();
        let id = id.to_string();
        let changes = changes.clone();

        tokio::task::spawn_blocking(move || client.update_row(&collection, &id, &changes))
            .await
            .map_err(join_error)?
    }

    async fn delete_row(&self, collection: &str, id: &str) -> FleetApiResult<()> {
        let client = self.client.clone();
        let collection = collection.to_string();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.delete_row(&collection, &id))
            .await
            .map_err(join_error)?
    }
}
