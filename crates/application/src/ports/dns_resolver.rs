use async_trait::async_trait;
use ferrous_dig_domain::{DnsQuery, DomainError, Message};

#[derive(Debug, Clone)]
pub struct DnsResolution {
    pub message: Message,
    /// True when the answer came from the response cache and no packet was sent.
    pub cache_hit: bool,
}

impl DnsResolution {
    pub fn new(message: Message, cache_hit: bool) -> Self {
        Self { message, cache_hit }
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;

    /// Check only the response cache without touching the network.
    /// Default implementation returns None (no cache).
    fn try_cache(&self, _query: &DnsQuery) -> Option<DnsResolution> {
        None
    }
}
