//! Providers reading pools and ticks from the subgraph.

mod pool_locator;
mod tick_fetcher;

pub use pool_locator::{PoolLocator, filter_pools};
pub use tick_fetcher::TickFetcher;
