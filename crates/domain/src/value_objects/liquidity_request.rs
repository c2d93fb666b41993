use crate::error::DomainError;
use crate::value_objects::fee_tier::{FeeTier, FeeTierSet};
use crate::value_objects::token_pair::TokenPair;
use serde::{Deserialize, Serialize};

/// What the caller wants analysed: a token pair and the fee tiers to include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRequest {
    pub pair: TokenPair,
    pub fee_tiers: FeeTierSet,
}

impl LiquidityRequest {
    /// Creates a request from raw symbols and fee tier values.
    pub fn new(
        token_a: &str,
        token_b: &str,
        fee_tiers: impl IntoIterator<Item = u32>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            pair: TokenPair::new(token_a, token_b)?,
            fee_tiers: FeeTierSet::new(fee_tiers)?,
        })
    }

    /// Returns true when a pool with these token symbols and fee tier is wanted.
    #[must_use]
    pub fn accepts(&self, symbol0: &str, symbol1: &str, fee_tier: FeeTier) -> bool {
        self.fee_tiers.contains(fee_tier) && self.pair.matches(symbol0, symbol1)
    }
}
