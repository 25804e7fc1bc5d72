mod cache_maintenance_port;
mod dns_resolver;

pub use cache_maintenance_port::{CacheMaintenancePort, CacheSweepOutcome};
pub use dns_resolver::{DnsResolution, DnsResolver};

pub use ferrous_dig_domain::DnsQuery;
