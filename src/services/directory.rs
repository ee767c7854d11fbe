//! Customer lookups with nested orders

use crate::types::{CustomerDetail, Dataset, Result, RevtrackError};

/// Default page size for `CustomerDirectory::list`
pub const DEFAULT_CUSTOMER_LIMIT: usize = 50;

pub struct CustomerDirectory;

impl CustomerDirectory {
    /// First `limit` customers by ascending id, each with its orders
    pub fn list(dataset: &Dataset, limit: usize) -> Vec<CustomerDetail> {
        dataset
            .customers()
            .iter()
            .take(limit)
            .map(|c| CustomerDetail::new(c, dataset.orders_for(c.id)))
            .collect()
    }

    /// Single customer with its orders
    pub fn get(dataset: &Dataset, id: u64) -> Result<CustomerDetail> {
        let customer = dataset
            .customer(id)
            .ok_or_else(|| RevtrackError::NotFound(format!("customer {}", id)))?;
        Ok(CustomerDetail::new(customer, dataset.orders_for(id)))
    }
}
