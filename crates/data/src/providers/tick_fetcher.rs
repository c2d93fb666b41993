use crate::config::PagingConfig;
use crate::error::DataError;
use crate::pagination::{PageSource, Paginator};
use crate::subgraph::{NumericText, QueryBuilder, SubgraphClient, Transport};
use async_trait::async_trait;
use serde::Deserialize;
use tickscope_domain::entities::Tick;
use tickscope_domain::error::DomainError;
use tracing::info;

#[derive(Debug, Deserialize)]
struct TicksPage {
    ticks: Vec<TickRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TickRecord {
    id: String,
    tick_idx: NumericText,
    liquidity_gross: NumericText,
    liquidity_net: NumericText,
}

impl TryFrom<TickRecord> for Tick {
    type Error = DomainError;

    fn try_from(record: TickRecord) -> Result<Self, Self::Error> {
        let tick_idx = record.tick_idx.into_string();
        let tick_idx = tick_idx
            .trim()
            .parse::<i32>()
            .map_err(|_| {
                DomainError::malformed_tick(record.id.as_str(), "tickIdx", tick_idx.as_str())
            })?;
        Ok(Tick {
            id: record.id,
            tick_idx,
            liquidity_gross: record.liquidity_gross.into_string(),
            liquidity_net: record.liquidity_net.into_string(),
        })
    }
}

/// Reads every tick of a pool.
pub struct TickFetcher<'a, T> {
    client: &'a SubgraphClient<T>,
    paginator: Paginator,
}

impl<'a, T: Transport> TickFetcher<'a, T> {
    pub fn new(client: &'a SubgraphClient<T>, paging: PagingConfig) -> Self {
        Self {
            client,
            paginator: Paginator::new(paging),
        }
    }

    /// Returns the pool's ticks in id order. A pool without ticks yields an
    /// empty list.
    pub async fn fetch_ticks(&self, pool_id: &str) -> Result<Vec<Tick>, DataError> {
        let source = PoolTickSource {
            client: self.client,
            pool_id,
        };
        let ticks = self.paginator.collect_all(&source).await?;
        info!(pool_id, ticks = ticks.len(), "fetched ticks");
        Ok(ticks)
    }
}

struct PoolTickSource<'a, T> {
    client: &'a SubgraphClient<T>,
    pool_id: &'a str,
}

#[async_trait]
impl<'a, T: Transport> PageSource for PoolTickSource<'a, T> {
    type Item = Tick;

    fn resource(&self) -> String {
        format!("ticks of pool {}", self.pool_id)
    }

    async fn fetch_page(&self, after: &str, first: u32) -> Result<Vec<Tick>, DataError> {
        let query = QueryBuilder::collection("ticks")
            .first(first)
            .order_by_asc("id")
            .filter("poolAddress", "pool", "String", self.pool_id)
            .filter("id_gt", "lastId", "ID", after)
            .field("id")
            .field("tickIdx")
            .field("liquidityGross")
            .field("liquidityNet")
            .build()?;
        let page: TicksPage = self.client.execute(&query).await?;
        page.ticks
            .into_iter()
            .map(|record| Tick::try_from(record).map_err(DataError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::test_utils::{FakeSubgraph, ScriptedTransport};
    use serde_json::json;

    fn subgraph() -> FakeSubgraph {
        let mut subgraph = FakeSubgraph::new();
        for idx in [-120, -60, 0, 60, 120, 180, 240] {
            subgraph = subgraph.with_tick("0xpool", idx, "1000", "-5");
        }
        subgraph.with_tick("0xother", 10, "1", "1")
    }

    #[tokio::test]
    async fn test_fetch_ticks_is_scoped_to_pool() {
        let client = SubgraphClient::new(subgraph(), RetryPolicy::immediate(1));

        let ticks = TickFetcher::new(&client, PagingConfig::new(3, 100))
            .fetch_ticks("0xpool")
            .await
            .unwrap();

        let idx: Vec<i32> = ticks.iter().map(|t| t.tick_idx).collect();
        assert_eq!(idx, vec![-120, -60, 0, 60, 120, 180, 240]);
        assert!(ticks.iter().all(|t| t.id.starts_with("0xpool#")));
        // Two full pages, a partial one, then the empty page.
        assert_eq!(client.transport().request_count(), 4);
    }

    #[tokio::test]
    async fn test_page_size_does_not_change_result() {
        let mut results = Vec::new();
        for page_size in [1, 2, 7, 8, 1000] {
            let client = SubgraphClient::new(subgraph(), RetryPolicy::immediate(1));
            let ticks = TickFetcher::new(&client, PagingConfig::new(page_size, 100))
                .fetch_ticks("0xpool")
                .await
                .unwrap();
            results.push(ticks);
        }
        assert_eq!(results[0].len(), 7);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_pool_without_ticks() {
        let client = SubgraphClient::new(subgraph(), RetryPolicy::immediate(1));

        let ticks = TickFetcher::new(&client, PagingConfig::default())
            .fetch_ticks("0xempty")
            .await
            .unwrap();

        assert!(ticks.is_empty());
        assert_eq!(client.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_query_shape_and_cursor() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "data": { "ticks": [
            { "id": "0xp#-60", "tickIdx": "-60", "liquidityGross": "10", "liquidityNet": "10" },
            { "id": "0xp#60", "tickIdx": 60, "liquidityGross": "10", "liquidityNet": "-10" },
        ] } }));
        transport.push_ok(json!({ "data": { "ticks": [] } }));
        let client = SubgraphClient::new(transport, RetryPolicy::immediate(1));

        let ticks = TickFetcher::new(&client, PagingConfig::new(2, 10))
            .fetch_ticks("0xp")
            .await
            .unwrap();

        assert_eq!(ticks[1].tick_idx, 60);
        assert_eq!(ticks[1].liquidity_net, "-10");
        let requests = client.transport().requests();
        assert_eq!(
            requests[0].text(),
            "query ($pageSize: Int, $pool: String, $lastId: ID) \
             { ticks(first: $pageSize, orderBy: id, orderDirection: asc, \
             where: { poolAddress: $pool, id_gt: $lastId }) \
             { id tickIdx liquidityGross liquidityNet } }"
        );
        assert_eq!(
            serde_json::Value::Object(requests[0].variables().clone()),
            json!({ "pageSize": 2, "pool": "0xp", "lastId": "" })
        );
        assert_eq!(requests[1].variables()["lastId"], "0xp#60");
    }

    #[tokio::test]
    async fn test_failure_mid_pagination_discards_ticks() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "data": { "ticks": [
            { "id": "0xp#1", "tickIdx": "1", "liquidityGross": "1", "liquidityNet": "1" },
        ] } }));
        transport.push_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        transport.push_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let client = SubgraphClient::new(transport, RetryPolicy::immediate(2));

        let err = TickFetcher::new(&client, PagingConfig::new(1, 10))
            .fetch_ticks("0xp")
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::QueryExhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_bad_tick_index() {
        let transport = ScriptedTransport::new();
        transport.push_ok(json!({ "data": { "ticks": [
            { "id": "0xp#x", "tickIdx": "12.5", "liquidityGross": "1", "liquidityNet": "1" },
        ] } }));
        let client = SubgraphClient::new(transport, RetryPolicy::immediate(1));

        let err = TickFetcher::new(&client, PagingConfig::default())
            .fetch_ticks("0xp")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DataError::Domain(DomainError::MalformedRecord { field: "tickIdx", .. })
        ));
    }
}
