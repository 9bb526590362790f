use compact_str::CompactString;
use rootwalk_application::ports::ResolutionCachePort;
use rootwalk_domain::{CacheEntry, DomainError};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct CachedResolution {
    domain: Arc<str>,
    addresses: BTreeSet<IpAddr>,
}

#[derive(Default)]
struct CacheInner {
    /// Entries in insertion order; enumeration indices are positions here.
    entries: Vec<CachedResolution>,
    /// Domain name to position in `entries`.
    positions: FxHashMap<CompactString, usize>,
}

impl CacheInner {
    fn reindex(&mut self) {
        self.positions.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            self.positions.insert(CompactString::from(&*entry.domain), index);
        }
    }
}

/// In-memory resolution cache for the lifetime of a session.
///
/// Keys are matched exactly as given. Entries never expire; they leave only
/// through `remove` or `clear`.
#[derive(Default)]
pub struct ResolutionCache {
    inner: RwLock<CacheInner>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResolutionCachePort for ResolutionCache {
    fn lookup(&self, domain: &str) -> Option<BTreeSet<IpAddr>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let hit = inner
            .positions
            .get(domain)
            .map(|&index| inner.entries[index].addresses.clone());

        debug!(domain = %domain, hit = hit.is_some(), "Cache lookup");
        hit
    }

    fn insert(&self, domain: &str, addresses: BTreeSet<IpAddr>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        if let Some(&index) = inner.positions.get(domain) {
            inner.entries[index].addresses = addresses;
            info!(domain = %domain, index, "Cache entry updated");
            return;
        }

        let index = inner.entries.len();
        inner.entries.push(CachedResolution {
            domain: Arc::from(domain),
            addresses,
        });
        inner.positions.insert(CompactString::from(domain), index);

        info!(domain = %domain, index, entries = index + 1, "Cache entry added");
    }

    fn entries(&self) -> Vec<CacheEntry> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| CacheEntry {
                index,
                domain: Arc::clone(&entry.domain),
                addresses: entry.addresses.clone(),
            })
            .collect()
    }

    fn remove(&self, index: usize) -> Result<CacheEntry, DomainError> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let len = inner.entries.len();
        if index >= len {
            return Err(DomainError::CacheIndexOutOfRange { index, len });
        }

        let removed = inner.entries.remove(index);
        inner.reindex();

        info!(domain = %removed.domain, index, entries = len - 1, "Cache entry removed");

        Ok(CacheEntry {
            index,
            domain: removed.domain,
            addresses: removed.addresses,
        })
    }

    fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let cleared = inner.entries.len();
        inner.entries.clear();
        inner.positions.clear();

        info!(cleared, "Cache cleared");
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len()
    }
}
