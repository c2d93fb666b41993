//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use tickscope_domain::prelude::*;
//! ```

pub use crate::aggregation::{Aggregator, PoolTicks};
pub use crate::entities::{AggregatedRecord, Pool, Tick, Token};
pub use crate::error::DomainError;
pub use crate::math::price_tick::tick_to_price;
pub use crate::value_objects::{FeeTier, FeeTierSet, LiquidityRequest, Percentage, TokenPair};
