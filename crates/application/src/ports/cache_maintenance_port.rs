use async_trait::async_trait;
use ferrous_dig_domain::DomainError;
use serde::Serialize;

/// Outcome of one expired-entry sweep.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for background cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError>;
}
