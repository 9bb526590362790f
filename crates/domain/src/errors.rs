use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Timed out waiting for a reply from {server}")]
    Timeout { server: IpAddr },

    #[error("Unmatched transaction from {server}: sent id {sent}, received id {received}")]
    UnmatchedTransaction {
        server: IpAddr,
        sent: u16,
        received: u16,
    },

    #[error("Query failed at {server} with response code {rcode}")]
    QueryFailed { server: IpAddr, rcode: String },

    #[error("Domain name is unresolvable: {0}")]
    Unresolvable(String),

    #[error("Max referral depth {max_depth} exceeded while resolving {domain}")]
    MaxDepthExceeded { domain: String, max_depth: usize },

    #[error("No usable referral from {server} for {domain}")]
    NoReferral { domain: String, server: IpAddr },

    #[error("CNAME chain for {domain} exceeds {max_hops} hops or loops")]
    AliasChainTooLong { domain: String, max_hops: usize },

    #[error("Cache index {index} out of range (0..{len})")]
    CacheIndexOutOfRange { index: usize, len: usize },
}
