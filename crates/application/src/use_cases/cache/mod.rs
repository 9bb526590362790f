mod clear_cache;
mod list_entries;
mod remove_entry;

pub use clear_cache::ClearCacheUseCase;
pub use list_entries::ListCacheEntriesUseCase;
pub use remove_entry::RemoveCacheEntryUseCase;
