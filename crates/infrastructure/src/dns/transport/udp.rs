//! UDP Transport for iterative DNS queries (RFC 1035 §4.2.1)
//!
//! One socket is bound for the whole session and every exchange goes through
//! it: one datagram out, one datagram back, bounded by the query timeout.
//! Messages are sent as-is (no framing) and truncated replies are not retried
//! over TCP.

use crate::dns::message::{MessageBuilder, ResponseParser};
use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use rootwalk_application::ports::MessageTransport;
use rootwalk_domain::{DnsQuery, DnsReply, DomainError, ResolverConfig};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const DNS_HEADER_LEN: usize = 12;

/// DNS over UDP transport bound to a single local socket
pub struct UdpTransport {
    socket: Mutex<UdpSocket>,
    local_addr: SocketAddr,
    port: u16,
    timeout: Duration,
    max_response_size: usize,
}

impl UdpTransport {
    /// Bind the session socket on `bind_address`, ephemeral port.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: &ResolverConfig) -> Result<Self, DomainError> {
        let bind_addr = SocketAddr::new(config.bind_address, 0);
        let socket = create_socket(bind_addr).map_err(|e| {
            DomainError::Unresolvable(format!("Failed to bind UDP socket on {}: {}", bind_addr, e))
        })?;
        let local_addr = socket.local_addr().map_err(|e| {
            DomainError::Unresolvable(format!("Failed to read local UDP address: {}", e))
        })?;

        debug!(local = %local_addr, port = config.dns_port, "UDP transport bound");

        Ok(Self {
            socket: Mutex::new(socket),
            local_addr,
            port: config.dns_port,
            timeout: config.query_timeout(),
            max_response_size: config.max_response_size,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    async fn exchange(&self, server: SocketAddr, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let socket = self.socket.lock().await;
        let mut recv_buf = vec![0u8; self.max_response_size];

        discard_stale_datagrams(&socket, &mut recv_buf);

        let bytes_sent = socket.send_to(message_bytes, server).await.map_err(|e| {
            DomainError::Unresolvable(format!("Failed to send UDP query to {}: {}", server, e))
        })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let (bytes_received, from_addr) = socket.recv_from(&mut recv_buf).await.map_err(|e| {
            DomainError::Unresolvable(format!(
                "Failed to receive UDP response from {}: {}",
                server, e
            ))
        })?;

        if from_addr != server {
            warn!(
                expected = %server,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %server, bytes_received = bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl MessageTransport for UdpTransport {
    async fn send(&self, server: IpAddr, query: &DnsQuery) -> Result<DnsReply, DomainError> {
        let (_, query_bytes) = MessageBuilder::build_query_with_id(query)?;
        let server_addr = SocketAddr::new(server, self.port);

        let response = tokio::time::timeout(self.timeout, self.exchange(server_addr, &query_bytes))
            .await
            .map_err(|_| DomainError::Timeout { server })??;

        validate_response_id(&query_bytes, &response, server)?;
        validate_response_code(&response, server)?;

        ResponseParser::parse(&response)
    }

    fn accepts(&self, server: IpAddr) -> bool {
        server.is_ipv4() == self.local_addr.is_ipv4()
    }
}

/// Drop datagrams already queued on the socket, such as late replies to
/// queries that timed out, so the next read belongs to the next query.
fn discard_stale_datagrams(socket: &UdpSocket, buf: &mut [u8]) {
    loop {
        match socket.try_recv_from(buf) {
            Ok((len, from)) => {
                debug!(from = %from, bytes = len, "Discarding stale UDP datagram");
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => break,
            Err(e) => {
                debug!(error = %e, "Stopped draining UDP socket");
                break;
            }
        }
    }
}

fn create_socket(bind_addr: SocketAddr) -> Result<UdpSocket, std::io::Error> {
    use socket2::{Domain, Protocol, Socket, Type};

    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if bind_addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }

    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

/// Reject a reply whose transaction id differs from the query's.
pub fn validate_response_id(query: &[u8], response: &[u8], server: IpAddr) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::Unresolvable(format!(
            "DNS message from {} too short to carry a transaction id",
            server
        )));
    }

    let sent = u16::from_be_bytes([query[0], query[1]]);
    let received = u16::from_be_bytes([response[0], response[1]]);

    if sent != received {
        warn!(server = %server, sent, received, "DNS transaction id mismatch");
        return Err(DomainError::UnmatchedTransaction {
            server,
            sent,
            received,
        });
    }

    Ok(())
}

/// Reject a reply whose response code is anything but NOERROR.
pub fn validate_response_code(response: &[u8], server: IpAddr) -> Result<(), DomainError> {
    if response.len() < DNS_HEADER_LEN {
        return Err(DomainError::Unresolvable(format!(
            "DNS response from {} shorter than a header ({} bytes)",
            server,
            response.len()
        )));
    }

    let rcode = ResponseCode::from(0, response[3] & 0x0F);
    if rcode != ResponseCode::NoError {
        return Err(DomainError::QueryFailed {
            server,
            rcode: ResponseParser::rcode_to_status(rcode).to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
