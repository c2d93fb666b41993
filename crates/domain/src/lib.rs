//! Domain model for liquidity-per-tick analysis.
//!
//! This crate holds the pure parts of the pipeline:
//! - Pool, token and tick entities as reported by the indexing service
//! - Fee tier and token pair value objects used for pool matching
//! - Tick to price conversion
//! - Aggregation of per-pool ticks into one labeled, sorted dataset

/// Prelude module for convenient imports.
pub mod prelude;

/// Aggregation of tick sequences.
pub mod aggregation;
/// Core entities.
pub mod entities;
/// Domain errors.
pub mod error;
/// Tick math.
pub mod math;
/// Value objects.
pub mod value_objects;
