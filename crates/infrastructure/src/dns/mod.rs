pub mod cache;
pub mod cache_maintenance;
pub mod codec;
pub mod events;
pub mod resolver;
pub mod transport;

pub use cache::{CacheKey, CacheSnapshot, CacheStats, Clock, ManualClock, ResponseCache, SystemClock};
pub use cache_maintenance::ResponseCacheMaintenance;
pub use codec::PacketCodec;
pub use events::{QueryEvent, QueryEventEmitter};
pub use resolver::QueryResolver;
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
