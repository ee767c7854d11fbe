//! Customer and order records, and the validated snapshot the aggregator reads

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{Result, RevtrackError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub signup_date: NaiveDate,
    /// Business classification ("Corporate", "Home Office", "Consumer", ...).
    /// Open set, never validated against a list.
    pub segment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer_id: u64,
    pub order_date: NaiveDate,
    pub amount: Decimal,
}

/// Immutable, validated snapshot of both relations.
///
/// Customers are kept in ascending id order; orders keep the order the
/// provider returned them in. The aggregator never depends on either
/// ordering for its results.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    by_id: HashMap<u64, usize>,
}

impl Dataset {
    /// Build a snapshot, rejecting duplicate keys and negative amounts.
    pub fn new(mut customers: Vec<Customer>, orders: Vec<Order>) -> Result<Self> {
        customers.sort_by_key(|c| c.id);

        let mut by_id = HashMap::with_capacity(customers.len());
        let mut emails: HashSet<&str> = HashSet::with_capacity(customers.len());
        for (idx, customer) in customers.iter().enumerate() {
            if by_id.insert(customer.id, idx).is_some() {
                return Err(RevtrackError::Validation(format!(
                    "duplicate customer id {}",
                    customer.id
                )));
            }
            if !emails.insert(customer.email.as_str()) {
                return Err(RevtrackError::Validation(format!(
                    "duplicate customer email '{}'",
                    customer.email
                )));
            }
        }

        let mut order_ids: HashSet<u64> = HashSet::with_capacity(orders.len());
        for order in &orders {
            if !order_ids.insert(order.id) {
                return Err(RevtrackError::Validation(format!(
                    "duplicate order id {}",
                    order.id
                )));
            }
            if order.amount < Decimal::ZERO {
                return Err(RevtrackError::Validation(format!(
                    "order {} has negative amount {}",
                    order.id, order.amount
                )));
            }
        }

        Ok(Self {
            customers,
            orders,
            by_id,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.orders.is_empty()
    }

    /// Look up a customer by id
    pub fn customer(&self, id: u64) -> Option<&Customer> {
        self.by_id.get(&id).map(|&idx| &self.customers[idx])
    }

    /// All orders placed by one customer, in snapshot order
    pub fn orders_for(&self, customer_id: u64) -> impl Iterator<Item = &Order> + '_ {
        self.orders
            .iter()
            .filter(move |o| o.customer_id == customer_id)
    }

    /// Inner join of orders to customers on `customer_id = id`.
    /// Orphan orders are skipped.
    pub fn joined(&self) -> impl Iterator<Item = (&Order, &Customer)> + '_ {
        self.orders
            .iter()
            .filter_map(move |o| self.customer(o.customer_id).map(|c| (o, c)))
    }

    /// Orders whose customer id matches no customer
    pub fn orphan_orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders
            .iter()
            .filter(move |o| !self.by_id.contains_key(&o.customer_id))
    }
}
