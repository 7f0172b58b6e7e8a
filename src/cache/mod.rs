// Page cache - read-through cache of view payloads keyed by resource path

pub mod keys;
pub mod page_cache;

pub use page_cache::{CacheStats, PageCache};
