use super::cache::ResponseCache;
use async_trait::async_trait;
use ferrous_dig_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use ferrous_dig_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

/// Infrastructure adapter implementing `CacheMaintenancePort`.
pub struct ResponseCacheMaintenance {
    cache: Arc<ResponseCache>,
}

impl ResponseCacheMaintenance {
    pub fn new(cache: Arc<ResponseCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for ResponseCacheMaintenance {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        let entries_removed = self.cache.sweep_expired();
        let cache_size = self.cache.len();

        debug!(entries_removed, cache_size, "Cache sweep cycle completed");

        Ok(CacheSweepOutcome {
            entries_removed,
            cache_size,
        })
    }
}
