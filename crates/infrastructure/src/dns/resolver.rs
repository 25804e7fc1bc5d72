use super::cache::{CacheKey, ResponseCache};
use super::codec::PacketCodec;
use super::events::{QueryEvent, QueryEventEmitter};
use super::transport::DnsTransport;
use async_trait::async_trait;
use ferrous_dig_application::ports::{DnsResolution, DnsResolver};
use ferrous_dig_domain::{DnsQuery, DomainError, Message, QueryMetadata, RecordType};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// TTL used for a NOERROR response that carries no records at all.
pub const DEFAULT_EMPTY_RESPONSE_TTL: u32 = 300;

/// Cache-first resolver over a single [`DnsTransport`].
///
/// A miss sends exactly one query. Errors are returned as-is and nothing is
/// cached for them.
pub struct QueryResolver {
    transport: Arc<dyn DnsTransport>,
    cache: Option<Arc<ResponseCache>>,
    emitter: QueryEventEmitter,
}

impl QueryResolver {
    pub fn new(transport: Arc<dyn DnsTransport>) -> Self {
        Self {
            transport,
            cache: None,
            emitter: QueryEventEmitter::new_disabled(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_emitter(mut self, emitter: QueryEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn cache(&self) -> Option<&Arc<ResponseCache>> {
        self.cache.as_ref()
    }

    pub async fn query(
        &self,
        domain: &str,
        record_type: RecordType,
        server: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let query = DnsQuery::new(domain, record_type)
            .with_server(server)
            .with_port(port)
            .with_timeout(timeout);

        self.resolve(&query).await.map(|resolution| resolution.message)
    }

    fn cache_key(query: &DnsQuery) -> CacheKey {
        CacheKey::new(&query.domain, query.record_type, &query.server)
    }

    async fn resolve_from_network(&self, query: &DnsQuery) -> Result<Message, DomainError> {
        let transaction_id = fastrand::u16(1..);
        let packet = PacketCodec::encode_query(&query.domain, query.record_type, transaction_id)?;

        let response = self
            .transport
            .send(&packet, &query.server, query.port, query.timeout)
            .await?;

        debug!(
            domain = %query.domain,
            server = %query.server,
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "DNS response received"
        );

        let message = PacketCodec::decode_response(&response.bytes, Some(transaction_id))?
            .with_query(QueryMetadata {
                name: query.domain.to_string(),
                record_type: query.record_type,
                server: query.server.to_string(),
            });

        if message.status.is_success() {
            if let Some(cache) = &self.cache {
                let ttl = message.min_ttl().unwrap_or(DEFAULT_EMPTY_RESPONSE_TTL);
                cache.put(Self::cache_key(query), &message, ttl);
            }
        }

        Ok(message)
    }

    fn emit(&self, query: &DnsQuery, start: Instant, cache_hit: bool, success: bool) {
        if self.emitter.is_enabled() {
            self.emitter.emit(QueryEvent::new(
                Arc::clone(&query.domain),
                query.record_type,
                Arc::clone(&query.server),
                start.elapsed().as_micros() as u64,
                cache_hit,
                success,
            ));
        }
    }
}

#[async_trait]
impl DnsResolver for QueryResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();

        if let Some(resolution) = self.try_cache(query) {
            self.emit(query, start, true, true);
            return Ok(resolution);
        }

        match self.resolve_from_network(query).await {
            Ok(message) => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    status = %message.status,
                    answers = message.answers.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query resolved"
                );
                self.emit(query, start, false, true);
                Ok(DnsResolution::new(message, false))
            }
            Err(e) => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    server = %query.server,
                    error = %e,
                    "Query failed"
                );
                self.emit(query, start, false, false);
                Err(e)
            }
        }
    }

    fn try_cache(&self, query: &DnsQuery) -> Option<DnsResolution> {
        let cache = self.cache.as_ref()?;
        cache
            .get(&Self::cache_key(query))
            .map(|message| DnsResolution::new(message, true))
    }
}
