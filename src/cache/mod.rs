//! Response caching
//!
//! The cache is constructed per run and owned by the coordinator, so there is
//! no global state and each test gets its own.

mod response_cache;

pub use response_cache::{CacheStats, KeySpace, KeySpaceStats, ResponseCache};
