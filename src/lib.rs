//! revtrack: revenue, lifetime value and top-customer metrics over
//! customer and order datasets.
//!
//! Data flows one way: a [`providers::DatasetProvider`] yields a validated
//! [`types::Dataset`] snapshot, [`services::Aggregator`] reduces it to
//! result rows, and the [`cli`] renders those rows as text or JSON.

pub mod cli;
pub mod config;
pub mod logging;
pub mod providers;
pub mod services;
pub mod types;
