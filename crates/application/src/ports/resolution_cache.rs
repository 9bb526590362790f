use rootwalk_domain::{CacheEntry, DomainError};
use std::collections::BTreeSet;
use std::net::IpAddr;

/// Session-lifetime store of resolved domains, enumerated in insertion order.
pub trait ResolutionCachePort: Send + Sync {
    fn lookup(&self, domain: &str) -> Option<BTreeSet<IpAddr>>;

    /// Adds or overwrites. An overwritten entry keeps its position.
    fn insert(&self, domain: &str, addresses: BTreeSet<IpAddr>);

    fn entries(&self) -> Vec<CacheEntry>;

    /// Removes the entry at `index` in the current enumeration order.
    fn remove(&self, index: usize) -> Result<CacheEntry, DomainError>;

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
