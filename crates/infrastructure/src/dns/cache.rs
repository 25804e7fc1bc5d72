pub mod clock;
mod entry;
pub mod key;
mod persistence;
pub mod snapshot;
pub mod stats;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use snapshot::{CacheSnapshot, SnapshotEntry};
pub use stats::CacheStats;
pub use storage::ResponseCache;
