use ferrous_dig_application::ports::{CacheMaintenancePort, DnsResolver};
use ferrous_dig_application::use_cases::BulkQueryUseCase;
use ferrous_dig_domain::Config;
use ferrous_dig_infrastructure::dns::{
    QueryEvent, QueryEventEmitter, QueryResolver, ResponseCache, ResponseCacheMaintenance,
    UdpTransport,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct DnsServices {
    pub resolver: Arc<QueryResolver>,
    pub cache: Option<Arc<ResponseCache>>,
    pub cache_maintenance: Option<Arc<dyn CacheMaintenancePort>>,
    pub bulk_query: BulkQueryUseCase,
    pub events: mpsc::UnboundedReceiver<QueryEvent>,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        info!("Initializing DNS services");

        let (emitter, events) = QueryEventEmitter::new_enabled();
        let cache = Self::build_cache(config);

        let mut resolver = QueryResolver::new(Arc::new(UdpTransport::new())).with_emitter(emitter);
        if let Some(cache) = &cache {
            resolver = resolver.with_cache(Arc::clone(cache));
        }
        let resolver = Arc::new(resolver);

        let cache_maintenance = cache.as_ref().map(|cache| {
            Arc::new(ResponseCacheMaintenance::new(Arc::clone(cache)))
                as Arc<dyn CacheMaintenancePort>
        });

        let bulk_query = BulkQueryUseCase::new(Arc::clone(&resolver) as Arc<dyn DnsResolver>);

        Self {
            resolver,
            cache,
            cache_maintenance,
            bulk_query,
            events,
        }
    }

    fn build_cache(config: &Config) -> Option<Arc<ResponseCache>> {
        if !config.cache.enabled {
            info!("Response cache disabled");
            return None;
        }

        let cache = Arc::new(ResponseCache::new(&config.cache));

        if let Some(path) = config.cache.persist_path.as_deref() {
            Self::import_cache(&cache, path);
        }

        info!(max_size = cache.max_size(), entries = cache.len(), "Response cache ready");
        Some(cache)
    }

    fn import_cache(cache: &ResponseCache, path: &str) {
        if !Path::new(path).exists() {
            debug!(path, "No cache file yet, starting empty");
            return;
        }

        if let Err(e) = cache.import_from_file(path) {
            warn!(error = %e, "Ignoring unreadable cache file");
        }
    }

    /// Writes the cache back to its persist path, if one is configured.
    pub fn persist_cache(&self, config: &Config) -> anyhow::Result<()> {
        if let (Some(cache), Some(path)) = (&self.cache, config.cache.persist_path.as_deref()) {
            cache.export_to_file(path)?;
        }
        Ok(())
    }

    /// Every event emitted so far, in emission order.
    pub fn drain_events(&mut self) -> Vec<QueryEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}
