pub mod fee_tier;
pub mod liquidity_request;
pub mod percentage;
pub mod token_pair;

pub use fee_tier::{FeeTier, FeeTierSet};
pub use liquidity_request::LiquidityRequest;
pub use percentage::Percentage;
pub use token_pair::TokenPair;
