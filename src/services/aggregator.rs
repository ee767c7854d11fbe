//! Aggregator service for computing revenue metrics

use crate::types::{
    round_money, CustomerValue, Dataset, MetricsSummary, MonthlyRevenue, Result, RevtrackError,
    SegmentRevenue,
};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Default row count for `top_customers`
pub const DEFAULT_TOP_LIMIT: i64 = 5;

/// Aggregator for computing revenue metrics.
///
/// Every function is a pure read of the snapshot. Sums are exact decimal
/// additions; rounding to cents happens once per output row.
pub struct Aggregator;

impl Aggregator {
    /// Revenue per customer segment (sorted by segment name ascending).
    /// Orphan orders are excluded.
    pub fn revenue_by_segment(dataset: &Dataset) -> Vec<SegmentRevenue> {
        let mut segment_map: BTreeMap<&str, Decimal> = BTreeMap::new();

        for (order, customer) in dataset.joined() {
            *segment_map.entry(customer.segment.as_str()).or_default() += order.amount;
        }

        segment_map
            .into_iter()
            .map(|(segment, total)| SegmentRevenue {
                segment: segment.to_string(),
                total_revenue: round_money(total),
            })
            .collect()
    }

    /// Revenue per `YYYY-MM` month of `order_date` (sorted ascending).
    /// Includes orphan orders; months without orders are absent.
    pub fn revenue_by_month(dataset: &Dataset) -> Vec<MonthlyRevenue> {
        let mut month_map: BTreeMap<String, Decimal> = BTreeMap::new();

        for order in dataset.orders() {
            let key = order.order_date.format("%Y-%m").to_string();
            *month_map.entry(key).or_default() += order.amount;
        }

        month_map
            .into_iter()
            .map(|(year_month, total)| MonthlyRevenue {
                year_month,
                total_revenue: round_money(total),
            })
            .collect()
    }

    /// Lifetime value per customer, highest first, ties by customer id ascending.
    /// Customers without orders are absent.
    pub fn customer_lifetime_value(dataset: &Dataset) -> Vec<CustomerValue> {
        let mut value_map: HashMap<u64, (&str, Decimal)> = HashMap::new();

        for (order, customer) in dataset.joined() {
            let slot = value_map
                .entry(customer.id)
                .or_insert((customer.name.as_str(), Decimal::ZERO));
            slot.1 += order.amount;
        }

        // Rank on the exact sum, not the rounded one
        let mut ranked: Vec<(u64, &str, Decimal)> = value_map
            .into_iter()
            .map(|(id, (name, total))| (id, name, total))
            .collect();
        ranked.sort_by_key(|&(id, _, total)| (Reverse(total), id));

        ranked
            .into_iter()
            .map(|(customer_id, name, total)| CustomerValue {
                customer_id,
                customer_name: name.to_string(),
                lifetime_value: round_money(total),
            })
            .collect()
    }

    /// First `limit` rows of [`Aggregator::customer_lifetime_value`].
    ///
    /// A negative limit is an `InvalidArgument`; zero yields an empty result.
    pub fn top_customers(dataset: &Dataset, limit: i64) -> Result<Vec<CustomerValue>> {
        let limit = usize::try_from(limit).map_err(|_| {
            RevtrackError::InvalidArgument(format!("limit must be >= 0, got {}", limit))
        })?;

        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut ranked = Self::customer_lifetime_value(dataset);
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Compute dataset-wide totals
    pub fn summary(dataset: &Dataset) -> MetricsSummary {
        if dataset.is_empty() {
            return MetricsSummary {
                total_revenue: round_money(Decimal::ZERO),
                joined_revenue: round_money(Decimal::ZERO),
                ..MetricsSummary::default()
            };
        }

        let total: Decimal = dataset.orders().iter().map(|o| o.amount).sum();
        let joined: Decimal = dataset.joined().map(|(o, _)| o.amount).sum();

        MetricsSummary {
            customer_count: dataset.customers().len() as u64,
            order_count: dataset.orders().len() as u64,
            orphan_order_count: dataset.orphan_orders().count() as u64,
            total_revenue: round_money(total),
            joined_revenue: round_money(joined),
        }
    }
}
