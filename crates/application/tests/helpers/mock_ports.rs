#![allow(dead_code)]

use async_trait::async_trait;
use rootwalk_application::ports::{MessageTransport, ResolutionCachePort};
use rootwalk_domain::{CacheEntry, DnsQuery, DnsReply, DomainError, RecordType};
use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: IpAddr,
    pub domain: String,
    pub record_type: RecordType,
}

/// Scripted transport keyed by (server, domain). Unscripted exchanges time out.
pub struct MockTransport {
    replies: RwLock<HashMap<(IpAddr, String), Result<DnsReply, DomainError>>>,
    calls: RwLock<Vec<SentQuery>>,
    ipv6_reachable: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
            ipv6_reachable: false,
        }
    }

    pub fn with_ipv6(mut self) -> Self {
        self.ipv6_reachable = true;
        self
    }

    pub fn on(&self, server: &str, domain: &str, reply: DnsReply) {
        self.replies
            .write()
            .unwrap()
            .insert((server.parse().unwrap(), domain.to_string()), Ok(reply));
    }

    pub fn fail(&self, server: &str, domain: &str, error: DomainError) {
        self.replies
            .write()
            .unwrap()
            .insert((server.parse().unwrap(), domain.to_string()), Err(error));
    }

    pub fn calls(&self) -> Vec<SentQuery> {
        self.calls.read().unwrap().clone()
    }

    pub fn servers_contacted(&self) -> Vec<IpAddr> {
        self.calls().into_iter().map(|call| call.server).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn send(&self, server: IpAddr, query: &DnsQuery) -> Result<DnsReply, DomainError> {
        assert!(!query.recursion_desired, "iterative queries only");

        self.calls.write().unwrap().push(SentQuery {
            server,
            domain: query.domain.to_string(),
            record_type: query.record_type,
        });

        self.replies
            .read()
            .unwrap()
            .get(&(server, query.domain.to_string()))
            .cloned()
            .unwrap_or(Err(DomainError::Timeout { server }))
    }

    fn accepts(&self, server: IpAddr) -> bool {
        server.is_ipv4() || self.ipv6_reachable
    }
}

/// Minimal insertion-ordered cache for use case tests.
#[derive(Default)]
pub struct MockResolutionCache {
    entries: RwLock<Vec<(String, BTreeSet<IpAddr>)>>,
    inserts: RwLock<usize>,
}

impl MockResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_count(&self) -> usize {
        *self.inserts.read().unwrap()
    }
}

impl ResolutionCachePort for MockResolutionCache {
    fn lookup(&self, domain: &str) -> Option<BTreeSet<IpAddr>> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, addresses)| addresses.clone())
    }

    fn insert(&self, domain: &str, addresses: BTreeSet<IpAddr>) {
        *self.inserts.write().unwrap() += 1;
        let mut entries = self.entries.write().unwrap();
        match entries.iter_mut().find(|(name, _)| name == domain) {
            Some(entry) => entry.1 = addresses,
            None => entries.push((domain.to_string(), addresses)),
        }
    }

    fn entries(&self) -> Vec<CacheEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(index, (domain, addresses))| CacheEntry {
                index,
                domain: Arc::from(domain.as_str()),
                addresses: addresses.clone(),
            })
            .collect()
    }

    fn remove(&self, index: usize) -> Result<CacheEntry, DomainError> {
        let mut entries = self.entries.write().unwrap();
        if index >= entries.len() {
            return Err(DomainError::CacheIndexOutOfRange {
                index,
                len: entries.len(),
            });
        }
        let (domain, addresses) = entries.remove(index);
        Ok(CacheEntry {
            index,
            domain: Arc::from(domain),
            addresses,
        })
    }

    fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
