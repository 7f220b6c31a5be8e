use crate::client::RowFilter;
use crate::error::FleetApiResult;
use crate::models::Record;
use async_trait::async_trait;

/// Storage access for one record type.
///
/// Provides abstraction over record storage and retrieval,
/// enabling different implementations (backend client, in-memory mock).
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Retrieve a single record by ID.
    async fn get(&self, id: &str) -> FleetApiResult<T>;

    /// Retrieve one page of records matching `filter`.
    async fn list(&self, filter: &RowFilter, limit: usize, offset: usize)
        -> FleetApiResult<Vec<T>>;

    /// Retrieve every record matching `filter`, page by page.
    async fn list_all(&self, filter: &RowFilter) -> FleetApiResult<Vec<T>> {
        const PAGE_SIZE: usize = 100;
        let mut all = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.list(filter, PAGE_SIZE, offset).await?;
            let count = page.len();
            all.extend(page);

            if count < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(all)
    }

    /// Create a record; the returned copy carries the backend-assigned ID.
    async fn create(&self, record: &T) -> FleetApiResult<T>;

    /// Replace the writable columns of an existing record.
    async fn update(&self, id: &str, record: &T) -> FleetApiResult<T>;

    async fn delete(&self, id: &str) -> FleetApiResult<()>;
}
