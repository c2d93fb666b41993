//! Merging of per-pool tick sequences into one price-annotated dataset.

use crate::entities::{AggregatedRecord, Pool, Tick};
use crate::error::DomainError;
use crate::math::price_tick::tick_to_price;

/// A pool together with every tick fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolTicks {
    pub pool: Pool,
    pub ticks: Vec<Tick>,
}

impl PoolTicks {
    #[must_use]
    pub fn new(pool: Pool, ticks: Vec<Tick>) -> Self {
        Self { pool, ticks }
    }
}

/// Combines the ticks of several pools into records sorted by fee tier label
/// and then by tick index.
///
/// No record is dropped: filtering zero or negative liquidity is left to the
/// consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aggregator;

impl Aggregator {
    /// Tags, merges and sorts the given batches.
    ///
    /// # Errors
    /// Returns [`DomainError::MalformedRecord`] if a liquidity value is not a
    /// finite real number.
    pub fn aggregate(
        &self,
        batches: impl IntoIterator<Item = PoolTicks>,
    ) -> Result<Vec<AggregatedRecord>, DomainError> {
        let mut records = Vec::new();
        for PoolTicks { pool, ticks } in batches {
            let fee_label = pool.fee_tier.label();
            records.reserve(ticks.len());
            for tick in ticks {
                records.push(AggregatedRecord {
                    liquidity_gross: parse_liquidity(&tick, "liquidityGross", &tick.liquidity_gross)?,
                    liquidity_net: parse_liquidity(&tick, "liquidityNet", &tick.liquidity_net)?,
                    price: tick_to_price(tick.tick_idx),
                    pool_id: pool.id.clone(),
                    fee_tier: pool.fee_tier,
                    fee_label: fee_label.clone(),
                    tick_idx: tick.tick_idx,
                    tick_id: tick.id,
                });
            }
        }
        // Stable, so pools sharing a tier keep their input order on equal ticks.
        records.sort_by(|a, b| {
            a.fee_label
                .cmp(&b.fee_label)
                .then_with(|| a.tick_idx.cmp(&b.tick_idx))
        });
        Ok(records)
    }
}

fn parse_liquidity(tick: &Tick, field: &'static str, raw: &str) -> Result<f64, DomainError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DomainError::malformed_tick(tick.id.as_str(), field, raw))
}
