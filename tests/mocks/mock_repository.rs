use async_trait::async_trait;
use fleet_mcp_server::client::RowFilter;
use fleet_mcp_server::domain::RecordId;
use fleet_mcp_server::error::{FleetApiError, FleetApiResult};
use fleet_mcp_server::models::Record;
use fleet_mcp_server::repositories::Repository;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory repository for any record type.
///
/// Rows keep insertion order. Filters compare each condition against the
/// record's serialized column, like the backend's `eq` operator. Method
/// calls are counted for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockRepository<T: Record> {
    rows: Arc<Mutex<Vec<T>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    offline: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl<T: Record> MockRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed a record as-is, keeping its ID.
    pub fn add(&self, record: T) {
        self.rows.lock().unwrap().push(record);
    }

    pub fn add_all(&self, records: Vec<T>) {
        self.rows.lock().unwrap().extend(records);
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Make every call fail with a timeout, as if the backend were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> FleetApiResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.offline.load(Ordering::SeqCst) {
            Err(FleetApiError::Timeout)
        } else {
            Ok(())
        }
    }

    fn matches(record: &T, filter: &RowFilter) -> bool {
        let row = serde_json::to_value(record).unwrap();
        filter.conditions().iter().all(|(column, expected)| {
            match row.get(column) {
                Some(Value::String(s)) => s == expected,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == *expected,
            }
        })
    }

    fn with_id(record: &T, id: &str) -> T {
        let mut row = serde_json::to_value(record).unwrap();
        row["id"] = Value::String(id.to_string());
        serde_json::from_value(row).unwrap()
    }
}

impl<T: Record> Default for MockRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MockRepository<T> {
    async fn get(&self, id: &str) -> FleetApiResult<T> {
        self.track_call("get")?;

        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| FleetApiError::NotFound(format!("{} {}", T::COLLECTION, id)))
    }

    async fn list(
        &self,
        filter: &RowFilter,
        limit: usize,
        offset: usize,
    ) -> FleetApiResult<Vec<T>> {
        self.track_call("list")?;

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| Self::matches(r, filter))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(&self, record: &T) -> FleetApiResult<T> {
        self.track_call("create")?;

        let stored = Self::with_id(record, RecordId::generate().as_str());
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, record: &T) -> FleetApiResult<T> {
        self.track_call("update")?;

        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| FleetApiError::NotFound(format!("{} {}", T::COLLECTION, id)))?;
        *slot = Self::with_id(record, id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> FleetApiResult<()> {
        self.track_call("delete")?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(FleetApiError::NotFound(format!("{} {}", T::COLLECTION, id)));
        }
        Ok(())
    }
}
