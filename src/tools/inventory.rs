//! Inventory tools.
//!
//! Searches run over a snapshot of the whole parts table held in a
//! [`TimedCache`]; every write through these tools drops the snapshot.

use crate::cache::TimedCache;
use crate::client::RowFilter;
use crate::error::{FieldIssue, FleetApiError, FormError, ServiceError, ServiceResult};
use crate::forms::PartForm;
use crate::matching::{PartMatch, PartMatcher};
use crate::metrics::Metrics;
use crate::models::InventoryPart;
use crate::repositories::Repository;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

const SNAPSHOT_KEY: &str = "inventory_parts";

/// Search settings taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SearchDefaults {
    pub max_results: usize,
    pub min_confidence: u8,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            max_results: 5,
            min_confidence: 30,
        }
    }
}

/// Ranked parts for a search query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPartsResponse {
    pub query: String,
    pub matches: Vec<PartMatch>,

    /// Whether the snapshot came from cache
    pub from_cache: bool,
}

/// Tools for the parts inventory.
pub struct InventoryTools {
    part_repo: Arc<dyn Repository<InventoryPart>>,
    snapshot: TimedCache<&'static str, Arc<Vec<InventoryPart>>>,
    matcher: PartMatcher,
    metrics: Metrics,
    defaults: SearchDefaults,
}

impl InventoryTools {
    pub fn new(
        part_repo: Arc<dyn Repository<InventoryPart>>,
        metrics: Metrics,
        cache_ttl_secs: u64,
        defaults: SearchDefaults,
    ) -> Self {
        Self {
            part_repo,
            snapshot: TimedCache::new(cache_ttl_secs),
            matcher: PartMatcher::new(),
            metrics,
            defaults,
        }
    }

    /// Validate the form and store a new part.
    pub async fn add_part(&self, form: PartForm) -> ServiceResult<InventoryPart> {
        let part = form.into_record(&self.metrics)?;

        let filter = RowFilter::new().eq("part_number", &part.part_number);
        if !self.part_repo.list(&filter, 1, 0).await?.is_empty() {
            return Err(FormError::Invalid(vec![FieldIssue::new(
                "part_number",
                format!("{} is already in inventory", part.part_number),
            )])
            .into());
        }

        let created = self.part_repo.create(&part).await?;
        self.invalidate_snapshot();
        info!(id = %created.id, part_number = %created.part_number, "Part added");
        Ok(created)
    }

    /// Add `delta` units (negative to issue stock).
    ///
    /// Fails without writing when stock would drop below zero.
    pub async fn adjust_stock(&self, part_id: &str, delta: i64) -> ServiceResult<InventoryPart> {
        let mut part = self.part_repo.get(part_id).await.map_err(|e| match e {
            FleetApiError::NotFound(_) => ServiceError::NotFound(format!("Part {}", part_id)),
            other => other.into(),
        })?;

        let updated = i64::from(part.quantity) + delta;
        if updated < 0 {
            return Err(ServiceError::InvalidParameters(format!(
                "Cannot remove {} of {}: only {} in stock",
                -delta, part.part_number, part.quantity
            )));
        }
        part.quantity = u32::try_from(updated).map_err(|_| {
            ServiceError::InvalidParameters(format!("Stock for {} would overflow", part.part_number))
        })?;

        let saved = self.part_repo.update(part_id, &part).await?;
        self.invalidate_snapshot();
        info!(part_number = %saved.part_number, quantity = saved.quantity, "Stock adjusted");
        Ok(saved)
    }

    /// Delete a discontinued part. Only parts with no stock left may go.
    pub async fn remove_part(&self, part_id: &str) -> ServiceResult<InventoryPart> {
        let part = self.part_repo.get(part_id).await.map_err(|e| match e {
            FleetApiError::NotFound(_) => ServiceError::NotFound(format!("Part {}", part_id)),
            other => other.into(),
        })?;

        if part.quantity > 0 {
            return Err(ServiceError::InvalidParameters(format!(
                "{} still has {} in stock",
                part.part_number, part.quantity
            )));
        }

        self.part_repo.delete(part_id).await?;
        self.invalidate_snapshot();
        info!(part_number = %part.part_number, "Part removed");
        Ok(part)
    }

    /// Find parts by part number or fuzzy name.
    pub async fn search_parts(
        &self,
        query: &str,
        max_results: Option<usize>,
        min_confidence: Option<u8>,
    ) -> ServiceResult<SearchPartsResponse> {
        if query.trim().is_empty() {
            return Err(ServiceError::InvalidParameters(
                "Search query cannot be empty".to_string(),
            ));
        }
        if let Some(confidence) = min_confidence {
            if confidence > 100 {
                return Err(ServiceError::InvalidParameters(
                    "min_confidence must be between 0 and 100".to_string(),
                ));
            }
        }

        let (parts, from_cache) = self.snapshot().await?;
        let matches = self.matcher.find_matches(
            query,
            &parts,
            max_results.unwrap_or(self.defaults.max_results),
            min_confidence.unwrap_or(self.defaults.min_confidence),
        );
        debug!(query = %query, matches = matches.len(), from_cache, "Searched parts");

        Ok(SearchPartsResponse {
            query: query.to_string(),
            matches,
            from_cache,
        })
    }

    /// Parts at or below their reorder level, emptiest first.
    pub async fn low_stock_parts(&self) -> ServiceResult<Vec<InventoryPart>> {
        let (parts, _) = self.snapshot().await?;
        let mut low: Vec<InventoryPart> =
            parts.iter().filter(|p| p.is_low_stock()).cloned().collect();
        low.sort_by(|a, b| {
            a.quantity
                .cmp(&b.quantity)
                .then_with(|| a.part_number.cmp(&b.part_number))
        });
        Ok(low)
    }

    /// The cached parts table, loading it on a miss.
    async fn snapshot(&self) -> ServiceResult<(Arc<Vec<InventoryPart>>, bool)> {
        if let Some(parts) = self.snapshot.get(&SNAPSHOT_KEY) {
            self.metrics.record_cache_access(SNAPSHOT_KEY, true);
            return Ok((parts, true));
        }
        self.metrics.record_cache_access(SNAPSHOT_KEY, false);
        self.snapshot.cleanup_expired();

        let parts = Arc::new(self.part_repo.list_all(&RowFilter::new()).await?);
        self.snapshot.insert(SNAPSHOT_KEY, parts.clone());
        Ok((parts, false))
    }

    pub fn invalidate_snapshot(&self) {
        self.snapshot.invalidate(&SNAPSHOT_KEY);
    }
}
