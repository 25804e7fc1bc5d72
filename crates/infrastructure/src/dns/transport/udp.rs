//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram back. A response with the TC bit set is
//! returned as-is; there is no TCP retry.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_dig_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Largest datagram accepted from the server.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    async fn resolve_server(
        server: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<SocketAddr, DomainError> {
        if let Ok(ip) = server.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }

        let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host((server, port)))
            .await
            .map_err(|_| timeout_error(server, timeout))?
            .map_err(|e| DomainError::Transport {
                server: server.to_string(),
                reason: format!("failed to resolve server address: {}", e),
            })?;

        addrs.next().ok_or_else(|| DomainError::Transport {
            server: server.to_string(),
            reason: "server name resolved to no addresses".to_string(),
        })
    }
}

fn timeout_error(server: &str, timeout: Duration) -> DomainError {
    DomainError::QueryTimeout {
        server: server.to_string(),
        timeout_ms: timeout.as_millis() as u64,
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = Self::resolve_server(server, port, timeout).await?;

        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let transport_error = |reason: String| DomainError::Transport {
            server: server.to_string(),
            reason,
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| transport_error(format!("failed to bind UDP socket: {}", e)))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send_to(message_bytes, server_addr))
            .await
            .map_err(|_| timeout_error(server, timeout))?
            .map_err(|e| transport_error(format!("failed to send UDP query: {}", e)))?;

        debug!(
            server = %server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| timeout_error(server, timeout))?
                .map_err(|e| transport_error(format!("failed to receive UDP response: {}", e)))?;

        if from_addr.ip() != server_addr.ip() {
            warn!(
                expected = %server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_literal_address_skips_lookup() {
        let addr = UdpTransport::resolve_server("9.9.9.9", 5353, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(addr, "9.9.9.9:5353".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_ipv6_literal() {
        let addr = UdpTransport::resolve_server("2001:4860:4860::8888", 53, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 53);
    }

    #[test]
    fn test_protocol_name() {
        assert_eq!(UdpTransport::new().protocol_name(), "UDP");
    }
}
