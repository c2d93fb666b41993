//! In-memory stand-ins for the subgraph used by unit tests.

use crate::error::{DataError, TransportError};
use crate::pagination::{Identified, PageSource};
use crate::subgraph::{GraphQlQuery, Transport};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays queued responses and records every query it receives.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, StatusCode>>>,
    requests: Mutex<Vec<GraphQlQuery>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_status(&self, status: StatusCode) {
        self.responses.lock().unwrap().push_back(Err(status));
    }

    pub fn requests(&self) -> Vec<GraphQlQuery> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, query: &GraphQlQuery) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(query.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(TransportError::Status { status }),
            None => panic!("unexpected query: {}", query.text()),
        }
    }
}

/// A tiny subgraph serving `pools` and `ticks` from memory.
///
/// It reads the `pageSize`, `lastId` and `pool` variables bound by the
/// providers, and answers pages ordered by id.
#[derive(Debug, Default)]
pub struct FakeSubgraph {
    pools: Vec<Value>,
    ticks: Vec<(String, Value)>,
    requests: AtomicUsize,
}

impl FakeSubgraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, id: &str, symbol0: &str, symbol1: &str, fee_tier: u32) -> Self {
        self.pools.push(json!({
            "id": id,
            "token0": { "symbol": symbol0, "id": format!("{id}-t0") },
            "token1": { "symbol": symbol1, "id": format!("{id}-t1") },
            "feeTier": fee_tier.to_string(),
        }));
        self.pools.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
        self
    }

    /// Adds a tick whose id is `<pool>#<offset index>`, so ids sort like indices.
    pub fn with_tick(mut self, pool_id: &str, tick_idx: i32, gross: &str, net: &str) -> Self {
        let id = format!("{pool_id}#{:07}", i64::from(tick_idx) + 1_000_000);
        self.ticks.push((
            pool_id.to_string(),
            json!({
                "id": id,
                "tickIdx": tick_idx.to_string(),
                "liquidityGross": gross,
                "liquidityNet": net,
            }),
        ));
        self.ticks.sort_by(|a, b| a.1["id"].as_str().cmp(&b.1["id"].as_str()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn page<'a>(records: impl Iterator<Item = &'a Value>, after: &str, first: usize) -> Vec<Value> {
        records
            .filter(|r| r["id"].as_str().is_some_and(|id| id > after))
            .take(first)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for FakeSubgraph {
    async fn send(&self, query: &GraphQlQuery) -> Result<Value, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let text = query.text();
        let variables = query.variables();
        let first = variables
            .get("pageSize")
            .and_then(Value::as_u64)
            .map_or(100, |n| n as usize);
        let after = string_variable(query, "lastId");

        if text.contains("{ pools(") {
            let pools = Self::page(self.pools.iter(), &after, first);
            Ok(json!({ "data": { "pools": pools } }))
        } else if text.contains("{ ticks(") {
            let pool = string_variable(query, "pool");
            let ticks = Self::page(
                self.ticks.iter().filter(|(p, _)| *p == pool).map(|(_, t)| t),
                &after,
                first,
            );
            Ok(json!({ "data": { "ticks": ticks } }))
        } else {
            panic!("unsupported query: {text}");
        }
    }
}

fn string_variable(query: &GraphQlQuery, name: &str) -> String {
    query
        .variables()
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Simple identified record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item(pub String);

impl Identified for Item {
    fn id(&self) -> &str {
        &self.0
    }
}

/// `count` items with ids `id-000`, `id-001`, ...
pub fn ids(count: usize) -> Vec<Item> {
    (0..count).map(|i| Item(format!("id-{i:03}"))).collect()
}

/// A sorted in-memory resource.
#[derive(Debug)]
pub struct VecSource {
    items: Vec<Item>,
    ignore_cursor: bool,
    cursors: Mutex<Vec<String>>,
}

impl VecSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ignore_cursor: false,
            cursors: Mutex::new(Vec::new()),
        }
    }

    /// Misbehaves by always serving the first page.
    pub fn ignoring_cursor(mut self) -> Self {
        self.ignore_cursor = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.cursors.lock().unwrap().len()
    }

    pub fn cursors(&self) -> Vec<String> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for VecSource {
    type Item = Item;

    fn resource(&self) -> String {
        "items".to_string()
    }

    async fn fetch_page(&self, after: &str, first: u32) -> Result<Vec<Item>, DataError> {
        self.cursors.lock().unwrap().push(after.to_string());
        Ok(self
            .items
            .iter()
            .filter(|item| self.ignore_cursor || item.0.as_str() > after)
            .take(first as usize)
            .cloned()
            .collect())
    }
}
