pub mod aggregated_record;
pub mod pool;
pub mod tick;
pub mod token;

// Re-export for easier access
pub use aggregated_record::AggregatedRecord;
pub use pool::Pool;
pub use tick::Tick;
pub use token::Token;
