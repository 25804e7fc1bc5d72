use super::clock::{Clock, SystemClock};
use super::entry::CacheEntry;
use super::stats::{CacheStats, Counters};
use super::CacheKey;
use ferrous_dig_domain::{CacheConfig, Message};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};
use tracing::debug;

pub(super) struct CacheState {
    pub entries: FxHashMap<CacheKey, CacheEntry>,
    pub counters: Counters,
    next_seq: u64,
}

/// Bounded, TTL-aware store of decoded responses.
///
/// One mutex guards the entries and every counter, so a foreground lookup
/// and the background sweep never observe each other half-done. No await
/// happens while it is held. Messages are cloned on the way in and out.
pub struct ResponseCache {
    state: Mutex<CacheState>,
    max_size: usize,
    pub(super) clock: Arc<dyn Clock>,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config.max_size, Arc::new(SystemClock))
    }

    pub fn with_clock(max_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: FxHashMap::default(),
                counters: Counters::default(),
                next_seq: 0,
            }),
            max_size,
            clock,
        }
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &CacheKey) -> Option<Message> {
        let now = self.clock.now();
        let mut state = self.lock();

        let lookup = state
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| entry.message.clone()));

        match lookup {
            Some(Some(message)) => {
                state.counters.hits += 1;
                debug!(key = %key, "Cache hit");
                Some(message)
            }
            Some(None) => {
                state.entries.remove(key);
                state.counters.misses += 1;
                debug!(key = %key, "Cache miss (expired)");
                None
            }
            None => {
                state.counters.misses += 1;
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    /// Stores a copy of `message` for `ttl_secs`. A zero TTL or a zero-sized
    /// cache stores nothing. Returns whether the entry was stored.
    pub fn put(&self, key: CacheKey, message: &Message, ttl_secs: u32) -> bool {
        if ttl_secs == 0 || self.max_size == 0 {
            return false;
        }

        let now = self.clock.now();
        let expires_at = now + Duration::from_secs(u64::from(ttl_secs));
        let mut state = self.lock();

        if !state.entries.contains_key(&key) && state.entries.len() >= self.max_size {
            Self::evict_oldest(&mut state);
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            key,
            CacheEntry {
                message: message.clone(),
                created_at: now,
                expires_at,
                seq,
            },
        );
        true
    }

    fn evict_oldest(state: &mut CacheState) {
        let oldest = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.eviction_rank())
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            state.entries.remove(&key);
            state.counters.evictions += 1;
            debug!(key = %key, "Cache entry evicted");
        }
    }

    /// Like `get` without touching the hit/miss counters.
    pub fn is_cached(&self, key: &CacheKey) -> bool {
        let now = self.clock.now();
        let mut state = self.lock();

        match state.entries.get(key).map(|entry| entry.is_expired(now)) {
            Some(false) => true,
            Some(true) => {
                state.entries.remove(key);
                false
            }
            None => false,
        }
    }

    /// Whole seconds until `key` expires, 0 when absent or expired.
    pub fn remaining_ttl(&self, key: &CacheKey) -> u64 {
        let now = self.clock.now();
        self.lock()
            .entries
            .get(key)
            .map(|entry| entry.remaining(now).as_secs())
            .unwrap_or(0)
    }

    pub fn delete(&self, key: &CacheKey) -> bool {
        self.lock().entries.remove(key).is_some()
    }

    /// Drops every entry and resets hits and misses. Evictions and cleanups are kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.counters.hits = 0;
        state.counters.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        self.stats_of(&state)
    }

    pub(super) fn stats_of(&self, state: &CacheState) -> CacheStats {
        let approx_memory_bytes = state
            .entries
            .iter()
            .map(|(key, entry)| {
                key.len() + entry.message.approx_size() + std::mem::size_of::<CacheEntry>()
            })
            .sum();

        CacheStats {
            entries: state.entries.len(),
            hits: state.counters.hits,
            misses: state.counters.misses,
            hit_ratio: state.counters.hit_ratio(),
            evictions: state.counters.evictions,
            cleanups: state.counters.cleanups,
            approx_memory_bytes,
            max_size: self.max_size,
        }
    }

    /// Removes every expired entry in one pass and returns how many went.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.lock();

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - state.entries.len();

        if removed > 0 {
            state.counters.cleanups += 1;
        }

        removed
    }

    pub(super) fn now(&self) -> SystemTime {
        self.clock.now()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("max_size", &self.max_size)
            .field("clock", &self.clock)
            .finish()
    }
}
