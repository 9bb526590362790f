use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// l.root-servers.net, operated by ICANN.
pub const DEFAULT_ROOT_SERVER: IpAddr = IpAddr::V4(Ipv4Addr::new(199, 7, 83, 42));

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_root_server")]
    pub root_server: IpAddr,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_max_cname_hops")]
    pub max_cname_hops: usize,

    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            query_timeout_ms: default_query_timeout_ms(),
            max_depth: default_max_depth(),
            max_cname_hops: default_max_cname_hops(),
            max_response_size: default_max_response_size(),
        }
    }
}

fn default_root_server() -> IpAddr {
    DEFAULT_ROOT_SERVER
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_max_depth() -> usize {
    10
}

fn default_max_cname_hops() -> usize {
    8
}

fn default_max_response_size() -> usize {
    8192
}
