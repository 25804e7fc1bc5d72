use ferrous_dig_domain::Message;
use std::time::{Duration, SystemTime};

/// Stored response. Replaced wholesale on put, never mutated in place.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    pub message: Message,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
    /// Insertion order, breaks ties between entries created in the same instant.
    pub seq: u64,
}

impl CacheEntry {
    #[inline]
    pub fn is_expired(&self, now: SystemTime) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub fn remaining(&self, now: SystemTime) -> Duration {
        self.expires_at.duration_since(now).unwrap_or_default()
    }

    #[inline]
    pub fn eviction_rank(&self) -> (SystemTime, u64) {
        (self.created_at, self.seq)
    }
}
