use async_trait::async_trait;
use rootwalk_domain::{DnsQuery, DnsReply, DomainError};
use std::net::IpAddr;

/// One query, one reply. Implementations never retry.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send `query` to `server` and return its validated reply.
    ///
    /// Fails with `Timeout`, `UnmatchedTransaction`, `QueryFailed` or
    /// `Unresolvable`.
    async fn send(&self, server: IpAddr, query: &DnsQuery) -> Result<DnsReply, DomainError>;

    /// Whether `server` is reachable through this transport's socket.
    fn accepts(&self, _server: IpAddr) -> bool {
        true
    }
}
