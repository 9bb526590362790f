//! rootwalk domain layer
pub mod cache_entry;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_reply;
pub mod errors;

pub use cache_entry::CacheEntry;
pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use dns_reply::DnsReply;
pub use errors::DomainError;
