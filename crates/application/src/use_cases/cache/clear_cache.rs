use crate::ports::ResolutionCachePort;
use std::sync::Arc;
use tracing::info;

pub struct ClearCacheUseCase {
    cache: Arc<dyn ResolutionCachePort>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<dyn ResolutionCachePort>) -> Self {
        Self { cache }
    }

    /// Returns how many entries were dropped.
    pub fn execute(&self) -> usize {
        let removed = self.cache.len();
        self.cache.clear();
        info!(removed, "Cache cleared");
        removed
    }
}
