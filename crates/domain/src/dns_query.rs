use super::RecordType;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SERVER: &str = "8.8.8.8";
pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One lookup: what to ask and where to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub server: Arc<str>,
    pub port: u16,
    pub timeout: Duration,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            server: Arc::from(DEFAULT_SERVER),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_server(mut self, server: impl Into<Arc<str>>) -> Self {
        self.server = server.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Same target and type, different name. Used by the bulk loop.
    pub fn for_domain(&self, domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            ..self.clone()
        }
    }
}
