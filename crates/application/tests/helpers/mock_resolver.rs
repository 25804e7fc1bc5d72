#![allow(dead_code)]
use async_trait::async_trait;
use ferrous_dig_application::ports::{DnsResolution, DnsResolver};
use ferrous_dig_domain::{DnsQuery, DomainError, Header, Message};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, DnsResolution>>>,
    error_responses: Arc<std::sync::RwLock<HashMap<String, DomainError>>>,
    seen: Arc<std::sync::Mutex<Vec<DnsQuery>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(std::sync::RwLock::new(HashMap::new())),
            seen: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub async fn set_response(&self, domain: &str, resolution: DnsResolution) {
        self.responses
            .write()
            .await
            .insert(domain.to_string(), resolution);
    }

    pub fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(domain.to_string(), error);
    }

    pub fn seen_queries(&self) -> Vec<DnsQuery> {
        self.seen.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.seen.lock().unwrap().push(query.clone());

        if let Some(err) = self
            .error_responses
            .read()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
        {
            return Err(err);
        }

        let responses = self.responses.read().await;
        Ok(responses
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or_else(|| empty_resolution(false)))
    }
}

pub fn empty_resolution(cache_hit: bool) -> DnsResolution {
    DnsResolution::new(
        Message::new(Header::from_flags(1, 0x8180, [1, 0, 0, 0])),
        cache_hit,
    )
}
