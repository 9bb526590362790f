use crate::ports::ResolutionCachePort;
use rootwalk_domain::{CacheEntry, DomainError};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct RemoveCacheEntryUseCase {
    cache: Arc<dyn ResolutionCachePort>,
}

impl RemoveCacheEntryUseCase {
    pub fn new(cache: Arc<dyn ResolutionCachePort>) -> Self {
        Self { cache }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, index: usize) -> Result<CacheEntry, DomainError> {
        match self.cache.remove(index) {
            Ok(entry) => {
                info!(index, domain = %entry.domain, "Cache entry removed");
                Ok(entry)
            }
            Err(e) => {
                warn!(index, error = %e, "Tried to remove a non-existent cache entry");
                Err(e)
            }
        }
    }
}
