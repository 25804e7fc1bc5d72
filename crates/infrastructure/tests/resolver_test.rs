mod helpers;

use ferrous_dig_application::ports::DnsResolver;
use ferrous_dig_domain::{DnsQuery, DomainError, ErrorKind, RecordType, ResponseStatus};
use ferrous_dig_infrastructure::dns::{
    CacheKey, QueryEventEmitter, QueryResolver, ResponseCache, UdpTransport,
};
use helpers::{answer_query, MockDnsServer, ResponsePacket};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(2);

fn cached_resolver() -> (QueryResolver, Arc<ResponseCache>) {
    let cache = Arc::new(ResponseCache::new(&Default::default()));
    let resolver = QueryResolver::new(Arc::new(UdpTransport::new())).with_cache(cache.clone());
    (resolver, cache)
}

fn query_to(server: &MockDnsServer, domain: &str) -> DnsQuery {
    DnsQuery::new(domain, RecordType::A)
        .with_server("127.0.0.1")
        .with_port(server.port())
        .with_timeout(TIMEOUT)
}

#[tokio::test]
async fn test_miss_then_hit() {
    let server = MockDnsServer::start_default().await.unwrap();
    let (resolver, cache) = cached_resolver();
    let query = query_to(&server, "example.com");

    let first = resolver.resolve(&query).await.unwrap();
    assert!(!first.cache_hit);
    assert_eq!(first.message.status, ResponseStatus::NoError);
    assert_eq!(first.message.answers[0].data.to_string(), "93.184.216.34");

    let second = resolver.resolve(&query).await.unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.message, first.message);

    assert_eq!(server.request_count(), 1);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(
        cache.remaining_ttl(&CacheKey::new("example.com", RecordType::A, "127.0.0.1")),
        60
    );
}

#[tokio::test]
async fn test_metadata_attached() {
    let server = MockDnsServer::start_default().await.unwrap();
    let (resolver, _cache) = cached_resolver();

    let message = resolver
        .query("example.com", RecordType::A, "127.0.0.1", server.port(), TIMEOUT)
        .await
        .unwrap();

    let meta = message.query.expect("metadata attached");
    assert_eq!(meta.name, "example.com");
    assert_eq!(meta.record_type, RecordType::A);
    assert_eq!(meta.server, "127.0.0.1");
}

#[tokio::test]
async fn test_nxdomain_not_cached() {
    let server = MockDnsServer::start(Arc::new(|query: &[u8]| Some(answer_query(query, 3, 60, &[]))))
        .await
        .unwrap();
    let (resolver, cache) = cached_resolver();
    let query = query_to(&server, "missing.example.com");

    let first = resolver.resolve(&query).await.unwrap();
    assert_eq!(first.message.status, ResponseStatus::NxDomain);
    resolver.resolve(&query).await.unwrap();

    assert_eq!(server.request_count(), 2);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_empty_noerror_cached_with_default_ttl() {
    let server = MockDnsServer::start(Arc::new(|query: &[u8]| Some(answer_query(query, 0, 60, &[]))))
        .await
        .unwrap();
    let (resolver, cache) = cached_resolver();

    resolver.resolve(&query_to(&server, "nodata.example.com")).await.unwrap();

    assert_eq!(
        cache.remaining_ttl(&CacheKey::new("nodata.example.com", RecordType::A, "127.0.0.1")),
        300
    );
}

#[tokio::test]
async fn test_zero_ttl_answer_not_cached() {
    let server =
        MockDnsServer::start(Arc::new(|query: &[u8]| Some(answer_query(query, 0, 0, &[[10, 0, 0, 1]]))))
            .await
            .unwrap();
    let (resolver, cache) = cached_resolver();
    let query = query_to(&server, "volatile.example.com");

    resolver.resolve(&query).await.unwrap();
    resolver.resolve(&query).await.unwrap();

    assert!(cache.is_empty());
    assert_eq!(server.request_count(), 2);
}

#[tokio::test]
async fn test_timeout_is_distinct_and_not_cached() {
    let server = MockDnsServer::start(Arc::new(|_: &[u8]| None)).await.unwrap();
    let (resolver, cache) = cached_resolver();
    let query = query_to(&server, "slow.example.com").with_timeout(Duration::from_millis(200));

    let err = resolver.resolve(&query).await.unwrap_err();

    assert!(matches!(
        err,
        DomainError::QueryTimeout { ref server, timeout_ms: 200 } if server == "127.0.0.1"
    ));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(server.request_count(), 1);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_wrong_transaction_id_rejected() {
    let server = MockDnsServer::start(Arc::new(|query: &[u8]| {
        let id = u16::from_be_bytes([query[0], query[1]]).wrapping_add(1);
        Some(ResponsePacket::new(id, 0x8180, [0, 0, 0, 0]).build())
    }))
    .await
    .unwrap();
    let (resolver, cache) = cached_resolver();

    let err = resolver
        .resolve(&query_to(&server, "spoofed.example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::TransactionMismatch { .. }));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_validation_error_sends_nothing() {
    let server = MockDnsServer::start_default().await.unwrap();
    let (resolver, _cache) = cached_resolver();

    let err = resolver
        .resolve(&DnsQuery::new("example.com", RecordType::SOA).with_port(server.port()).with_server("127.0.0.1"))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UnsupportedRecordType(_)));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_without_cache_always_queries() {
    let server = MockDnsServer::start_default().await.unwrap();
    let resolver = QueryResolver::new(Arc::new(UdpTransport::new()));
    let query = query_to(&server, "example.com");

    assert!(!resolver.resolve(&query).await.unwrap().cache_hit);
    assert!(!resolver.resolve(&query).await.unwrap().cache_hit);
    assert!(resolver.try_cache(&query).is_none());
    assert_eq!(server.request_count(), 2);
}

#[tokio::test]
async fn test_cache_key_ignores_port() {
    let server = MockDnsServer::start_default().await.unwrap();
    let (resolver, _cache) = cached_resolver();

    resolver.resolve(&query_to(&server, "example.com")).await.unwrap();

    // Nothing listens on this port; the answer comes from the cache.
    let other_port = query_to(&server, "example.com").with_port(9);
    assert!(resolver.resolve(&other_port).await.unwrap().cache_hit);
}

#[tokio::test]
async fn test_events_emitted_for_each_resolution() {
    let server = MockDnsServer::start_default().await.unwrap();
    let (emitter, mut rx) = QueryEventEmitter::new_enabled();
    let cache = Arc::new(ResponseCache::new(&Default::default()));
    let resolver = QueryResolver::new(Arc::new(UdpTransport::new()))
        .with_cache(cache)
        .with_emitter(emitter);
    let query = query_to(&server, "example.com");

    resolver.resolve(&query).await.unwrap();
    resolver.resolve(&query).await.unwrap();
    let _ = resolver
        .resolve(&DnsQuery::new("example.com", RecordType::SOA))
        .await;

    let miss = rx.recv().await.unwrap();
    let hit = rx.recv().await.unwrap();
    let failure = rx.recv().await.unwrap();

    assert!(!miss.cache_hit && miss.success);
    assert_eq!(miss.server.as_ref(), "127.0.0.1");
    assert!(hit.cache_hit && hit.success);
    assert!(!failure.success);
}
