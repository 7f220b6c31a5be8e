use crate::client::{AsyncFleetClient, RowFilter};
use crate::error::FleetApiResult;
use crate::models::Record;
use crate::repositories::traits::Repository;
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Repository backed by the fleet backend.
///
/// Delegates to the row-level [`AsyncFleetClient`] and converts rows to
/// and from `T` with serde.
pub struct BackendRepository<T> {
    client: Arc<dyn AsyncFleetClient>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> BackendRepository<T> {
    pub fn new(client: Arc<dyn AsyncFleetClient>) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

fn decode<T: Record>(row: Value) -> FleetApiResult<T> {
    Ok(serde_json::from_value(row)?)
}

#[async_trait]
impl<T: Record> Repository<T> for BackendRepository<T> {
    async fn get(&self, id: &str) -> FleetApiResult<T> {
        let row = self.client.get_row(T::COLLECTION, id).await?;
        decode(row)
    }

    async fn list(
        &self,
        filter: &RowFilter,
        limit: usize,
        offset: usize,
    ) -> FleetApiResult<Vec<T>> {
        self.client
            .list_rows(T::COLLECTION, filter, limit, offset)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn create(&self, record: &T) -> FleetApiResult<T> {
        let payload = record.to_payload()?;
        let row = self.client.insert_row(T::COLLECTION, &payload).await?;
        decode(row)
    }

    async fn update(&self, id: &str, record: &T) -> FleetApiResult<T> {
        let payload = record.to_payload()?;
        let row = self.client.update_row(T::COLLECTION, id, &payload).await?;
        decode(row)
    }

    async fn delete(&self, id: &str) -> FleetApiResult<()> {
        self.client.delete_row(T::COLLECTION, id).await
    }
}
