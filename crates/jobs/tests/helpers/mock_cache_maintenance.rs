#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_dig_application::ports::{CacheMaintenancePort, CacheSweepOutcome};
use ferrous_dig_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MockCacheMaintenancePort {
    sweep_calls: Arc<AtomicUsize>,
    should_fail: Arc<AtomicBool>,
    outcome: CacheSweepOutcome,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, outcome: CacheSweepOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sweep_call_count(&self) -> usize {
        self.sweep_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_sweep_cycle(&self) -> Result<CacheSweepOutcome, DomainError> {
        self.sweep_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ConfigError("mock sweep failure".to_string()));
        }
        Ok(self.outcome.clone())
    }
}
