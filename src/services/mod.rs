//! Services for metric aggregation and customer lookups

pub mod aggregator;
pub mod directory;

pub use aggregator::{Aggregator, DEFAULT_TOP_LIMIT};
pub use directory::{CustomerDirectory, DEFAULT_CUSTOMER_LIMIT};
