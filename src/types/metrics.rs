//! Aggregation result records

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Customer, Order};

/// Decimal places used for every reported monetary value
pub const MONEY_DP: u32 = 2;

/// Round a monetary sum for display: 2 dp, ties away from zero.
///
/// Amounts are non-negative, so this is the usual round-half-up. The
/// result always carries a scale of exactly 2 (`25.5` becomes `25.50`).
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DP);
    rounded
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRevenue {
    pub segment: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub year_month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

/// One row of the lifetime value ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerValue {
    pub customer_id: u64,
    pub customer_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub lifetime_value: Decimal,
}

/// Order as shown nested under its customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: u64,
    pub order_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<&Order> for OrderLine {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_date: order.order_date,
            amount: round_money(order.amount),
        }
    }
}

/// Customer record together with its orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetail {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub signup_date: NaiveDate,
    pub segment: String,
    pub orders: Vec<OrderLine>,
}

impl CustomerDetail {
    /// Attach orders, sorted by date then id
    pub fn new<'a>(customer: &Customer, orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut lines: Vec<OrderLine> = orders.into_iter().map(OrderLine::from).collect();
        lines.sort_by_key(|l| (l.order_date, l.id));
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            signup_date: customer.signup_date,
            segment: customer.segment.clone(),
            orders: lines,
        }
    }
}

/// Dataset-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub customer_count: u64,
    pub order_count: u64,
    pub orphan_order_count: u64,
    /// Every order, orphans included
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Orders with a matching customer only
    #[serde(with = "rust_decimal::serde::float")]
    pub joined_revenue: Decimal,
}
