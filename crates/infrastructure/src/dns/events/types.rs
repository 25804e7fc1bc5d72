use chrono::{DateTime, Utc};
use ferrous_dig_domain::RecordType;
use serde::Serialize;
use std::sync::Arc;

/// One resolution, as seen by timing and plotting consumers.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEvent {
    pub timestamp: DateTime<Utc>,

    pub domain: Arc<str>,

    pub record_type: RecordType,

    pub server: Arc<str>,

    pub response_time_us: u64,

    pub cache_hit: bool,

    pub success: bool,
}

impl QueryEvent {
    pub fn new(
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
        server: impl Into<Arc<str>>,
        response_time_us: u64,
        cache_hit: bool,
        success: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            domain: domain.into(),
            record_type,
            server: server.into(),
            response_time_us,
            cache_hit,
            success,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn response_time_ms(&self) -> f64 {
        self.response_time_us as f64 / 1000.0
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
