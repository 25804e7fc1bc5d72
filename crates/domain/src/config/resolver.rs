use crate::dns_query::{DEFAULT_PORT, DEFAULT_SERVER};
use crate::RecordType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where queries go and how long to wait for them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_record_type")]
    pub record_type: RecordType,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            timeout: default_timeout(),
            record_type: default_record_type(),
        }
    }
}

impl ResolverConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    5
}

fn default_record_type() -> RecordType {
    RecordType::A
}
