use serde::{Deserialize, Serialize};

/// One initialized tick of a pool.
///
/// Liquidity values are kept as the decimal text sent by the server; they are
/// converted to floating point during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Identifier unique within the pool, used as the pagination cursor.
    pub id: String,
    pub tick_idx: i32,
    pub liquidity_gross: String,
    pub liquidity_net: String,
}
