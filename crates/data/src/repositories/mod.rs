//! Repository implementations for local persistence.
//!
//! Only the pool catalog is cached. Everything stored here is an optimization:
//! a missing, stale or unreadable file means the data is fetched again.

mod pool_repository;

pub use pool_repository::{CATALOG_FORMAT_VERSION, PoolCatalogRecord, PoolRepository};
