mod message_transport;
mod resolution_cache;

pub use message_transport::MessageTransport;
pub use resolution_cache::ResolutionCachePort;

// Re-export for convenience
pub use rootwalk_domain::{DnsQuery, DnsReply};
