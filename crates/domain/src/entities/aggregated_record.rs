use crate::value_objects::FeeTier;
use serde::{Deserialize, Serialize};

/// A tick tagged with its pool, fee tier label and derived price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub pool_id: String,
    pub fee_tier: FeeTier,
    /// Fee tier as a percentage string, e.g. `"0.05%"`.
    pub fee_label: String,
    pub tick_id: String,
    pub tick_idx: i32,
    /// `1.0001 ^ tick_idx`.
    pub price: f64,
    pub liquidity_gross: f64,
    pub liquidity_net: f64,
}
