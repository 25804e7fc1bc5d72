pub mod udp;

use async_trait::async_trait;
use ferrous_dig_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request, one reply. No retries and no fallback to another protocol.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends `message_bytes` to `server:port` and waits up to `timeout` for the
    /// reply. A timeout is reported as `QueryTimeout`; every other failure as
    /// `Transport`.
    async fn send(
        &self,
        message_bytes: &[u8],
        server: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
