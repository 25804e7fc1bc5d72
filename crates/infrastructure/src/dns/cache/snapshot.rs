use super::{CacheKey, CacheStats};
use ferrous_dig_domain::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk form of the cache: live entries with their remaining TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Epoch seconds at export.
    pub timestamp: u64,
    pub stats: CacheStats,
    pub entries: BTreeMap<CacheKey, SnapshotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub data: Message,
    /// Whole seconds left at export. Zero or negative means stale.
    pub ttl_remaining: i64,
    /// Epoch seconds when the entry was stored.
    pub created: u64,
}

impl CacheSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
