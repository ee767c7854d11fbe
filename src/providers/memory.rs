//! In-memory provider for embedding callers, tests and benchmarks

use crate::types::{Customer, Order, Result};

use super::DatasetProvider;

/// Provider over owned vectors
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    customers: Vec<Customer>,
    orders: Vec<Order>,
}

impl MemoryProvider {
    pub fn new(customers: Vec<Customer>, orders: Vec<Order>) -> Self {
        Self { customers, orders }
    }
}

impl DatasetProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn list_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.clone())
    }
}
