use crate::config::PagingConfig;
use crate::error::DataError;
use crate::pagination::{PageSource, Paginator};
use crate::subgraph::{NumericText, QueryBuilder, SubgraphClient, Transport};
use async_trait::async_trait;
use serde::Deserialize;
use tickscope_domain::entities::{Pool, Token};
use tickscope_domain::error::DomainError;
use tickscope_domain::value_objects::{FeeTier, LiquidityRequest};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct PoolsPage {
    pools: Vec<PoolRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolRecord {
    id: String,
    token0: TokenRecord,
    token1: TokenRecord,
    fee_tier: NumericText,
}

#[derive(Debug, Deserialize)]
struct TokenRecord {
    symbol: String,
    #[serde(default)]
    id: String,
}

impl TryFrom<PoolRecord> for Pool {
    type Error = DomainError;

    fn try_from(record: PoolRecord) -> Result<Self, Self::Error> {
        let fee_tier = record.fee_tier.into_string();
        let fee_tier = fee_tier
            .trim()
            .parse::<u32>()
            .map(FeeTier::from_raw)
            .map_err(|_| {
                DomainError::malformed_pool(record.id.as_str(), "feeTier", fee_tier.as_str())
            })?;
        Ok(Pool {
            id: record.id,
            token0: Token::new(record.token0.id, record.token0.symbol),
            token1: Token::new(record.token1.id, record.token1.symbol),
            fee_tier,
        })
    }
}

/// Finds the pools trading a token pair in a set of fee tiers.
///
/// The subgraph cannot filter on token symbols case-insensitively, so the
/// whole catalog is paged in and filtered locally.
pub struct PoolLocator<'a, T> {
    client: &'a SubgraphClient<T>,
    paginator: Paginator,
}

impl<'a, T: Transport> PoolLocator<'a, T> {
    pub fn new(client: &'a SubgraphClient<T>, paging: PagingConfig) -> Self {
        Self {
            client,
            paginator: Paginator::new(paging),
        }
    }

    /// Reads every pool the subgraph knows about, in id order.
    pub async fn fetch_catalog(&self) -> Result<Vec<Pool>, DataError> {
        info!("searching for pools");
        let catalog = self.paginator.collect_all(self).await?;
        debug!(pools = catalog.len(), "pool catalog fetched");
        Ok(catalog)
    }

    /// Returns the pools matching `request`, in server order.
    ///
    /// An empty result is not an error.
    pub async fn find_pools(&self, request: &LiquidityRequest) -> Result<Vec<Pool>, DataError> {
        let catalog = self.fetch_catalog().await?;
        Ok(filter_pools(catalog, request))
    }
}

/// Keeps the pools of `catalog` that match `request`, preserving order.
pub fn filter_pools(
    catalog: impl IntoIterator<Item = Pool>,
    request: &LiquidityRequest,
) -> Vec<Pool> {
    let pools: Vec<Pool> = catalog.into_iter().filter(|pool| pool.matches(request)).collect();
    info!(pair = %request.pair, matches = pools.len(), "pools matched");
    pools
}

#[async_trait]
impl<'a, T: Transport> PageSource for PoolLocator<'a, T> {
    type Item = Pool;

    fn resource(&self) -> String {
        "pools".to_string()
    }

    async fn fetch_page(&self, after: &str, first: u32) -> Result<Vec<Pool>, DataError> {
        let query = QueryBuilder::collection("pools")
            .first(first)
            .order_by_asc("id")
            .filter("id_gt", "lastId", "ID", after)
            .field("id")
            .object("token0", &["symbol", "id"])
            .object("token1", &["symbol", "id"])
            .field("feeTier")
            .build()?;
        let page: PoolsPage = self.client.execute(&query).await?;
        page.pools
            .into_iter()
            .map(|record| Pool::try_from(record).map_err(DataError::from))
            .collect()
    }
}
