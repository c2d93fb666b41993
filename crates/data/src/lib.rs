//! Retrieval of pools and ticks from a Uniswap V3 style subgraph.
//!
//! This crate provides:
//! - An authenticated GraphQL client with a configurable retry policy
//! - A query builder that validates names and binds values to typed variables
//! - Cursor-based pagination shared by the pool and tick resources
//! - Pool lookup by token pair and fee tier, and per-pool tick retrieval
//! - A best-effort file cache for the pool catalog
//! - The pipeline tying the above to the domain aggregator

/// Client configuration.
pub mod config;
/// Error types.
pub mod error;
/// Cursor-based pagination.
pub mod pagination;
/// End-to-end retrieval pipeline.
pub mod pipeline;
/// Pool and tick providers.
pub mod providers;
/// File-backed caches.
pub mod repositories;
/// Retry policy.
pub mod retry;
/// GraphQL client, transport and query builder.
pub mod subgraph;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{DEFAULT_SUBGRAPH_URL, PagingConfig, SubgraphConfig};
pub use error::{DataError, TransportError};
pub use pipeline::{LiquidityPipeline, LiquidityReport, PipelineOutcome, PoolSummary};
pub use providers::{PoolLocator, TickFetcher};
pub use retry::{Backoff, RetryPolicy};
pub use subgraph::{GraphQlQuery, HttpTransport, QueryBuilder, SubgraphClient, Transport};
