use crate::entities::token::Token;
use crate::value_objects::{FeeTier, LiquidityRequest};
use serde::{Deserialize, Serialize};

/// A concentrated-liquidity pool as listed by the indexing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Pool address, globally unique.
    pub id: String,
    pub token0: Token,
    pub token1: Token,
    pub fee_tier: FeeTier,
}

impl Pool {
    /// Returns true when the pool trades the requested pair in one of the
    /// requested fee tiers.
    #[must_use]
    pub fn matches(&self, request: &LiquidityRequest) -> bool {
        request.accepts(&self.token0.symbol, &self.token1.symbol, self.fee_tier)
    }
}
