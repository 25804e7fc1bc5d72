use crate::ports::{DnsResolution, DnsResolver};
use ferrous_dig_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Result for one name of a bulk run.
#[derive(Debug)]
pub struct BulkQueryOutcome {
    pub domain: Arc<str>,
    pub result: Result<DnsResolution, DomainError>,
    pub elapsed: Duration,
}

impl BulkQueryOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Resolves a list of names one after another against the same target.
pub struct BulkQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl BulkQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Runs `template` once per domain, in order. A failing name is recorded
    /// in its outcome and the loop moves on.
    pub async fn execute<S>(&self, domains: &[S], template: &DnsQuery) -> Vec<BulkQueryOutcome>
    where
        S: AsRef<str>,
    {
        let mut outcomes = Vec::with_capacity(domains.len());

        for domain in domains {
            let query = template.for_domain(domain.as_ref());
            let start = Instant::now();
            let result = self.resolver.resolve(&query).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(resolution) => debug!(
                    domain = %query.domain,
                    cache_hit = resolution.cache_hit,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Bulk query resolved"
                ),
                Err(e) => warn!(domain = %query.domain, error = %e, "Bulk query failed"),
            }

            outcomes.push(BulkQueryOutcome {
                domain: query.domain,
                result,
                elapsed,
            });
        }

        outcomes
    }
}
