use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// One row of the resolution cache as seen by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub index: usize,
    pub domain: Arc<str>,
    pub addresses: BTreeSet<IpAddr>,
}

impl fmt::Display for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addresses: Vec<String> = self.addresses.iter().map(IpAddr::to_string).collect();
        write!(
            f,
            "{} - {}: {{{}}}",
            self.index,
            self.domain,
            addresses.join(", ")
        )
    }
}
