//! Cache Module
//!
//! In-memory store of origin responses keyed by request path and query.

mod stats;
mod store;


// Re-export public types
pub use stats::CacheStats;
pub use store::CacheStore;
