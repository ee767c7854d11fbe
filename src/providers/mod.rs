//! Dataset providers: where customers and orders come from

mod jsonl;
mod memory;

pub use jsonl::JsonlProvider;
pub use memory::MemoryProvider;

use crate::types::{Customer, Dataset, Order, Result};

/// Trait for sources of customer and order records
pub trait DatasetProvider: Send + Sync {
    /// Provider name (e.g., "jsonl")
    fn name(&self) -> &str;

    /// All customer records
    fn list_customers(&self) -> Result<Vec<Customer>>;

    /// All order records
    fn list_orders(&self) -> Result<Vec<Order>>;

    /// Read both relations into one validated snapshot.
    ///
    /// Providers over a mutable store override this to read both lists
    /// inside a single consistent read scope.
    fn snapshot(&self) -> Result<Dataset> {
        let customers = self.list_customers()?;
        let orders = self.list_orders()?;
        validated(self.name(), customers, orders)
    }
}

/// Build a `Dataset` and report orphan orders without failing
pub(crate) fn validated(
    provider: &str,
    customers: Vec<Customer>,
    orders: Vec<Order>,
) -> Result<Dataset> {
    let dataset = Dataset::new(customers, orders)?;

    let orphans = dataset.orphan_orders().count();
    if orphans > 0 {
        tracing::warn!(
            provider,
            orphans,
            "orders reference unknown customers; excluded from customer-joined metrics"
        );
    }
    tracing::debug!(
        provider,
        customers = dataset.customers().len(),
        orders = dataset.orders().len(),
        "dataset snapshot loaded"
    );

    Ok(dataset)
}
