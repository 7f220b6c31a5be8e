//! HTTP client for the hosted fleet database.
//!
//! The backend exposes each collection as a REST resource in the PostgREST
//! dialect: rows are filtered with `column=eq.value` query parameters and
//! writes echo the stored row back when asked with `Prefer: return=representation`.
//! This module provides a synchronous client that can be used from async
//! contexts via `tokio::task::spawn_blocking`.

mod async_wrapper;
pub use async_wrapper::{AsyncFleetClient, AsyncFleetClientImpl};

use crate::config::Config;
use crate::error::{FleetApiError, FleetApiResult};
use crate::metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Equality filters applied to a collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    conditions: Vec<(String, String)>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The `(column, value)` pairs in insertion order.
    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Render as query parameters, e.g. `status=eq.active&make=eq.Tata`.
    pub fn to_query(&self) -> String {
        self.conditions
            .iter()
            .map(|(column, value)| {
                format!(
                    "{}=eq.{}",
                    urlencoding::encode(column),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// HTTP client for the fleet backend.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct FleetClient {
    /// Base URL of the REST endpoint
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl FleetClient {
    /// Create a new FleetClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.fleet_api_url.clone(),
            api_key: config.fleet_api_key.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a FleetClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Attach authentication headers to a request.
    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
    }

    /// Run a request, timing it and mapping errors.
    fn execute(
        &self,
        method: &str,
        url: &str,
        send: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> FleetApiResult<ureq::Response> {
        let start = Instant::now();
        let result = send().map_err(|e| self.map_error(e));
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - status {}", method, url, response.status());
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
                self.metrics.record_http_error();
            }
        }
        self.metrics.record_http_request(duration);

        result
    }

    fn get(&self, path: &str) -> FleetApiResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("GET", &url, || self.authorize(self.agent.get(&url)).call())
    }

    fn post(&self, path: &str, body: &Value) -> FleetApiResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string(body).unwrap_or_else(|_| "<invalid json>".to_string())
        );
        self.execute("POST", &url, || {
            self.authorize(self.agent.post(&url))
                .set("Prefer", "return=representation")
                .send_json(body)
        })
    }

    fn patch(&self, path: &str, body: &Value) -> FleetApiResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("PATCH", &url, || {
            self.authorize(self.agent.request("PATCH", &url))
                .set("Prefer", "return=representation")
                .send_json(body)
        })
    }

    fn delete(&self, path: &str) -> FleetApiResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("DELETE", &url, || {
            self.authorize(self.agent.delete(&url)).call()
        })
    }

    /// Map a ureq error to a FleetApiError.
    fn map_error(&self, error: ureq::Error) -> FleetApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => FleetApiError::Unauthorized,
                    404 => FleetApiError::NotFound(message),
                    429 => FleetApiError::RateLimitExceeded,
                    400 | 422 => FleetApiError::InvalidRequest(message),
                    _ => FleetApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    FleetApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    FleetApiError::Timeout
                } else {
                    FleetApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read a response body as a JSON array of rows.
    fn read_rows(response: ureq::Response) -> FleetApiResult<Vec<Value>> {
        let body = response
            .into_string()
            .map_err(|e| FleetApiError::HttpError(e.to_string()))?;

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Object(row) => Ok(vec![Value::Object(row)]),
            other => Err(FleetApiError::Other(format!(
                "Expected rows in response, got: {}",
                other
            ))),
        }
    }

    fn id_path(collection: &str, id: &str) -> String {
        format!("/{}?id=eq.{}", collection, urlencoding::encode(id))
    }

    // ========================= Row Operations =========================

    /// List rows of a collection, ordered by `id` so offsets page stably.
    ///
    /// # Arguments
    /// * `collection` - Collection (table) name
    /// * `filter` - Equality filters
    /// * `limit` - Maximum number of rows to return
    /// * `offset` - Number of rows to skip (for pagination)
    pub fn list_rows(
        &self,
        collection: &str,
        filter: &RowFilter,
        limit: usize,
        offset: usize,
    ) -> FleetApiResult<Vec<Value>> {
        let mut path = format!(
            "/{}?select=*&order=id&limit={}&offset={}",
            collection, limit, offset
        );
        if !filter.is_empty() {
            path.push('&');
            path.push_str(&filter.to_query());
        }

        let rows = Self::read_rows(self.get(&path)?)?;
        self.metrics.record_rows_fetched(rows.len());
        Ok(rows)
    }

    /// Get a single row by ID.
    pub fn get_row(&self, collection: &str, id: &str) -> FleetApiResult<Value> {
        let path = format!("{}&select=*", Self::id_path(collection, id));
        let row = Self::read_rows(self.get(&path)?)?
            .into_iter()
            .next()
            .ok_or_else(|| FleetApiError::NotFound(format!("{} {}", collection, id)))?;

        self.metrics.record_rows_fetched(1);
        Ok(row)
    }

    /// Insert a row and return it as stored.
    pub fn insert_row(&self, collection: &str, row: &Value) -> FleetApiResult<Value> {
        let path = format!("/{}", collection);
        let stored = Self::read_rows(self.post(&path, row)?)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                FleetApiError::Other(format!("Insert into {} returned no row", collection))
            })?;

        self.metrics.record_row_written();
        Ok(stored)
    }

    /// Update a row by ID and return it as stored.
    pub fn update_row(&self, collection: &str, id: &str, changes: &Value) -> FleetApiResult<Value> {
        let path = Self::id_path(collection, id);
        let stored = Self::read_rows(self.patch(&path, changes)?)?
            .into_iter()
            .next()
            .ok_or_else(|| FleetApiError::NotFound(format!("{} {}", collection, id)))?;

        self.metrics.record_row_written();
        Ok(stored)
    }

    /// Delete a row by ID.
    pub fn delete_row(&self, collection: &str, id: &str) -> FleetApiResult<()> {
        self.delete(&Self::id_path(collection, id))?;
        self.metrics.record_row_written();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_filter_query() {
        let filter = RowFilter::new()
            .eq("status", "active")
            .eq("make", "Ashok Leyland");
        assert_eq!(filter.to_query(), "status=eq.active&make=eq.Ashok%20Leyland");
        assert_eq!(filter.conditions().len(), 2);
        assert!(RowFilter::new().is_empty());
    }

    #[test]
    fn test_build_url_trims_slashes() {
        let client = FleetClient::with_base_url(
            "https://fleet.example.com/rest/v1/".to_string(),
            "key".to_string(),
        );
        assert_eq!(
            client.build_url("/vehicles?select=*"),
            "https://fleet.example.com/rest/v1/vehicles?select=*"
        );
    }

    #[test]
    fn test_id_path_encodes() {
        assert_eq!(
            FleetClient::id_path("drivers", "a b"),
            "/drivers?id=eq.a%20b"
        );
    }
}
