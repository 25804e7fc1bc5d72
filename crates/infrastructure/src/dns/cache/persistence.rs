use super::clock::epoch_secs;
use super::snapshot::{CacheSnapshot, SnapshotEntry};
use super::storage::ResponseCache;
use ferrous_dig_domain::DomainError;
use std::path::Path;
use tracing::info;

impl ResponseCache {
    /// Live entries with their remaining TTL, plus current stats.
    pub fn export_snapshot(&self) -> CacheSnapshot {
        let now = self.now();
        let state = self.lock();

        let entries = state
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, entry)| {
                (
                    key.clone(),
                    SnapshotEntry {
                        data: entry.message.clone(),
                        ttl_remaining: i64::try_from(entry.remaining(now).as_secs())
                            .unwrap_or(i64::MAX),
                        created: epoch_secs(entry.created_at),
                    },
                )
            })
            .collect();

        CacheSnapshot {
            timestamp: epoch_secs(now),
            stats: self.stats_of(&state),
            entries,
        }
    }

    /// Writes the snapshot as pretty-printed JSON. Returns the entry count.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<usize, DomainError> {
        let path = path.as_ref();
        let snapshot = self.export_snapshot();

        let export_err = |reason: String| DomainError::CacheExport {
            path: path.display().to_string(),
            reason,
        };

        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| export_err(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| export_err(e.to_string()))?;

        info!(path = %path.display(), entries = snapshot.len(), "Cache exported");
        Ok(snapshot.len())
    }

    /// Re-creates every entry that still had TTL left at export, timed from now.
    /// Returns how many were stored.
    pub fn import_snapshot(&self, snapshot: &CacheSnapshot) -> usize {
        let mut imported = 0;

        for (key, entry) in &snapshot.entries {
            if entry.ttl_remaining <= 0 {
                continue;
            }
            let ttl = u32::try_from(entry.ttl_remaining).unwrap_or(u32::MAX);
            if self.put(key.clone(), &entry.data, ttl) {
                imported += 1;
            }
        }

        imported
    }

    pub fn import_from_file(&self, path: impl AsRef<Path>) -> Result<usize, DomainError> {
        let path = path.as_ref();

        let import_err = |reason: String| DomainError::CacheImport {
            path: path.display().to_string(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| import_err(e.to_string()))?;
        let snapshot: CacheSnapshot =
            serde_json::from_str(&contents).map_err(|e| import_err(e.to_string()))?;

        let imported = self.import_snapshot(&snapshot);
        info!(
            path = %path.display(),
            imported,
            skipped = snapshot.len() - imported,
            "Cache imported"
        );
        Ok(imported)
    }
}
