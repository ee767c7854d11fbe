//! Type definitions for revtrack

mod dataset;
mod error;
mod metrics;

pub use dataset::*;
pub use error::*;
pub use metrics::*;
