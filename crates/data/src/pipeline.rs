//! End-to-end retrieval: locate pools, fetch their ticks, aggregate.

use crate::config::PagingConfig;
use crate::error::DataError;
use crate::providers::{PoolLocator, TickFetcher, filter_pools};
use crate::repositories::PoolRepository;
use crate::subgraph::{HttpTransport, SubgraphClient, Transport};
use chrono::Utc;
use tickscope_domain::aggregation::{Aggregator, PoolTicks};
use tickscope_domain::entities::{AggregatedRecord, Pool};
use tickscope_domain::value_objects::LiquidityRequest;
use tracing::{info, warn};

/// A matched pool and how many ticks it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSummary {
    pub pool: Pool,
    pub tick_count: usize,
}

/// Aggregated liquidity for every matched pool.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityReport {
    /// Matched pools, in server order.
    pub pools: Vec<PoolSummary>,
    /// Records sorted by fee tier label, then tick index.
    pub records: Vec<AggregatedRecord>,
}

/// Result of a pipeline run.
///
/// Finding no pool is a normal outcome, distinct from an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    NoMatchingPools,
    Aggregated(LiquidityReport),
}

/// Runs the whole retrieval sequentially: one page, then one pool, at a time.
pub struct LiquidityPipeline<T = HttpTransport> {
    client: SubgraphClient<T>,
    paging: PagingConfig,
    pool_cache: Option<PoolRepository>,
}

impl<T: Transport> LiquidityPipeline<T> {
    pub fn new(client: SubgraphClient<T>, paging: PagingConfig) -> Self {
        Self {
            client,
            paging,
            pool_cache: None,
        }
    }

    /// Serves the pool catalog from `repository` while it is fresh.
    #[must_use]
    pub fn with_pool_cache(mut self, repository: PoolRepository) -> Self {
        self.pool_cache = Some(repository);
        self
    }

    pub fn client(&self) -> &SubgraphClient<T> {
        &self.client
    }

    /// Returns the pools matching `request`.
    pub async fn locate_pools(&self, request: &LiquidityRequest) -> Result<Vec<Pool>, DataError> {
        let catalog = match &self.pool_cache {
            Some(cache) => self.cached_catalog(cache).await?,
            None => PoolLocator::new(&self.client, self.paging).fetch_catalog().await?,
        };
        Ok(filter_pools(catalog, request))
    }

    /// Locates pools, fetches every tick of each, and aggregates them.
    ///
    /// Any failure aborts the run; no partial report is returned.
    pub async fn run(&self, request: &LiquidityRequest) -> Result<PipelineOutcome, DataError> {
        let pools = self.locate_pools(request).await?;
        if pools.is_empty() {
            info!(pair = %request.pair, "no matching pools found");
            return Ok(PipelineOutcome::NoMatchingPools);
        }

        let fetcher = TickFetcher::new(&self.client, self.paging);
        let mut batches = Vec::with_capacity(pools.len());
        for pool in pools {
            info!(pool_id = %pool.id, fee_tier = %pool.fee_tier, "fetching ticks for pool");
            let ticks = fetcher.fetch_ticks(&pool.id).await?;
            if ticks.is_empty() {
                warn!(pool_id = %pool.id, "pool has no ticks");
            }
            batches.push(PoolTicks::new(pool, ticks));
        }

        let summaries = batches
            .iter()
            .map(|batch| PoolSummary {
                pool: batch.pool.clone(),
                tick_count: batch.ticks.len(),
            })
            .collect();
        let records = Aggregator.aggregate(batches)?;
        info!(records = records.len(), "aggregation complete");

        Ok(PipelineOutcome::Aggregated(LiquidityReport {
            pools: summaries,
            records,
        }))
    }

    async fn cached_catalog(&self, cache: &PoolRepository) -> Result<Vec<Pool>, DataError> {
        match cache.load_fresh(Utc::now()).await {
            Ok(Some(record)) => {
                info!(
                    path = %cache.path().display(),
                    pools = record.pools.len(),
                    "using cached pool catalog"
                );
                return Ok(record.pools);
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "ignoring unreadable pool cache"),
        }

        let catalog = PoolLocator::new(&self.client, self.paging).fetch_catalog().await?;
        if let Err(err) = cache.save(&catalog, Utc::now()).await {
            warn!(error = %err, "failed to write pool cache");
        }
        Ok(catalog)
    }
}
