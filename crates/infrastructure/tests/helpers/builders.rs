#![allow(dead_code)]
use rootwalk_domain::ResolverConfig;
use std::net::Ipv4Addr;

pub const ROOT: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);
pub const AUTH: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 2);
pub const ANSWER_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 215, 14);

/// Loopback transport settings aimed at mock servers listening on `port`.
pub fn transport_config(port: u16, timeout_ms: u64) -> ResolverConfig {
    ResolverConfig {
        root_server: ROOT.into(),
        dns_port: port,
        bind_address: ROOT.into(),
        query_timeout_ms: timeout_ms,
        ..ResolverConfig::default()
    }
}
