pub mod cache;
pub mod dns;

// Re-export use cases
pub use cache::{ClearCacheUseCase, ListCacheEntriesUseCase, RemoveCacheEntryUseCase};
pub use dns::{LookupDomainUseCase, LookupOutcome, ReferralResolver};
