use crate::ports::ResolutionCachePort;
use rootwalk_domain::CacheEntry;
use std::sync::Arc;

pub struct ListCacheEntriesUseCase {
    cache: Arc<dyn ResolutionCachePort>,
}

impl ListCacheEntriesUseCase {
    pub fn new(cache: Arc<dyn ResolutionCachePort>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> Vec<CacheEntry> {
        self.cache.entries()
    }
}
