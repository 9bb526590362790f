use rootwalk_application::ports::ResolutionCachePort;
use rootwalk_application::use_cases::{
    ClearCacheUseCase, ListCacheEntriesUseCase, LookupDomainUseCase, ReferralResolver,
    RemoveCacheEntryUseCase,
};
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{ResolutionCache, UdpTransport};
use std::sync::Arc;
use tracing::info;

pub struct ResolverServices {
    pub lookup: LookupDomainUseCase,
    pub list_cache: ListCacheEntriesUseCase,
    pub remove_cache: RemoveCacheEntryUseCase,
    pub clear_cache: ClearCacheUseCase,
}

impl ResolverServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver_config = &config.resolver;

        let transport = Arc::new(UdpTransport::bind(resolver_config)?);
        info!(
            local = %transport.local_addr(),
            timeout_ms = resolver_config.query_timeout_ms,
            "UDP transport ready"
        );

        let resolver = Arc::new(
            ReferralResolver::new(transport, resolver_config.root_server)
                .with_max_depth(resolver_config.max_depth),
        );
        info!(
            root = %resolver.root_server(),
            max_depth = resolver_config.max_depth,
            "Referral resolver ready"
        );

        let cache: Arc<dyn ResolutionCachePort> = Arc::new(ResolutionCache::new());

        Ok(Self {
            lookup: LookupDomainUseCase::new(resolver, cache.clone())
                .with_max_cname_hops(resolver_config.max_cname_hops),
            list_cache: ListCacheEntriesUseCase::new(cache.clone()),
            remove_cache: RemoveCacheEntryUseCase::new(cache.clone()),
            clear_cache: ClearCacheUseCase::new(cache),
        })
    }
}
