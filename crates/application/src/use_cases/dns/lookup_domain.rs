use super::ReferralResolver;
use crate::ports::ResolutionCachePort;
use rootwalk_domain::{DnsRecord, DomainError, RecordType};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

const DEFAULT_MAX_CNAME_HOPS: usize = 8;

#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub domain: Arc<str>,
    pub addresses: BTreeSet<IpAddr>,
    /// Answer records of every walk, in the order they were obtained. Empty
    /// for cache hits.
    pub records: Vec<DnsRecord>,
    /// Alias targets followed on the way to the addresses.
    pub aliases: Vec<String>,
    pub cache_hit: bool,
}

impl LookupOutcome {
    fn cached(domain: Arc<str>, addresses: BTreeSet<IpAddr>) -> Self {
        Self {
            domain,
            addresses,
            records: Vec::new(),
            aliases: Vec::new(),
            cache_hit: true,
        }
    }
}

/// Cache check, referral walk, alias chase and cache write-back for one name.
pub struct LookupDomainUseCase {
    resolver: Arc<ReferralResolver>,
    cache: Arc<dyn ResolutionCachePort>,
    max_cname_hops: usize,
}

impl LookupDomainUseCase {
    pub fn new(resolver: Arc<ReferralResolver>, cache: Arc<dyn ResolutionCachePort>) -> Self {
        Self {
            resolver,
            cache,
            max_cname_hops: DEFAULT_MAX_CNAME_HOPS,
        }
    }

    pub fn with_max_cname_hops(mut self, max_cname_hops: usize) -> Self {
        self.max_cname_hops = max_cname_hops;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> Result<LookupOutcome, DomainError> {
        let domain = domain.trim();
        if domain.is_empty() || domain.starts_with('.') || domain.contains("..") {
            return Err(DomainError::InvalidDomainName(domain.to_string()));
        }
        let domain: Arc<str> = Arc::from(domain);

        if let Some(addresses) = self.cache.lookup(&domain) {
            debug!(domain = %domain, "Answer retrieved from cache");
            return Ok(LookupOutcome::cached(domain, addresses));
        }

        let mut outcome = LookupOutcome {
            domain: Arc::clone(&domain),
            addresses: BTreeSet::new(),
            records: Vec::new(),
            aliases: Vec::new(),
            cache_hit: false,
        };

        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut target = domain.to_string();

        loop {
            visited.insert(normalize(&target));

            let answers = self.resolver.resolve(&target, RecordType::A).await?;
            outcome
                .addresses
                .extend(answers.iter().filter_map(DnsRecord::address));

            let alias = alias_target(&answers, &target);
            outcome.records.extend(answers);

            let Some(alias) = alias else {
                break;
            };
            outcome.aliases.push(alias.clone());

            // The server already handed us the addresses behind the alias.
            if !outcome.addresses.is_empty() {
                break;
            }

            if outcome.aliases.len() > self.max_cname_hops || visited.contains(&normalize(&alias)) {
                return Err(DomainError::AliasChainTooLong {
                    domain: domain.to_string(),
                    max_hops: self.max_cname_hops,
                });
            }

            debug!(domain = %domain, alias = %alias, "Following alias");
            target = alias;
        }

        if !outcome.addresses.is_empty() {
            self.cache.insert(&domain, outcome.addresses.clone());
            info!(
                domain = %domain,
                addresses = outcome.addresses.len(),
                aliases = outcome.aliases.len(),
                "Query resolved"
            );
        }

        Ok(outcome)
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// End of the CNAME chain that starts at `owner` inside `answers`, if any.
fn alias_target(answers: &[DnsRecord], owner: &str) -> Option<String> {
    let mut current = normalize(owner);
    let mut found = None;

    for _ in 0..answers.len() {
        let next = answers
            .iter()
            .filter(|record| record.is_alias())
            .find(|record| normalize(&record.name) == current)
            .and_then(DnsRecord::target_name);

        match next {
            Some(name) => {
                current = normalize(name);
                found = Some(name.to_string());
            }
            None => break,
        }
    }

    found
}
