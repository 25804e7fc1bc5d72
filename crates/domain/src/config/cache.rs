use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry count bound. Reaching it evicts the oldest entry.
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Seconds between background sweeps of expired entries.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval: u64,

    /// Snapshot file imported at start and exported at exit.
    #[serde(default)]
    pub persist_path: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            max_size: default_max_size(),
            cleanup_interval: default_cleanup_interval(),
            persist_path: None,
        }
    }
}

impl CacheConfig {
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_size() -> usize {
    1000
}

fn default_cleanup_interval() -> u64 {
    60
}
