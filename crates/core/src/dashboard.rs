//! Dashboard aggregation.
//!
//! Everything here is display-only arithmetic over lists the backend already
//! returned; nothing is sent back.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Customer, Order, Product, format_usd, round_cents};

/// Products below this stock level show up in the low-stock warning.
pub const LOW_STOCK_WARNING_THRESHOLD: u32 = 10;

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub orders_this_month: usize,
    pub revenue_this_month: Decimal,
    /// Products with any stock left.
    pub active_products: usize,
    pub total_customers: usize,
}

/// A labelled dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub heading: &'static str,
    pub value: String,
}

impl Metrics {
    /// Compute metrics for the calendar month containing `now`.
    #[must_use]
    pub fn compute(
        orders: &[Order],
        products: &[Product],
        customers: &[Customer],
        now: DateTime<Utc>,
    ) -> Self {
        let this_month: Vec<&Order> = orders
            .iter()
            .filter(|o| o.date.year() == now.year() && o.date.month() == now.month())
            .collect();

        Self {
            orders_this_month: this_month.len(),
            revenue_this_month: round_cents(this_month.iter().map(|o| o.display_total()).sum()),
            active_products: products.iter().filter(|p| p.stock > 0).count(),
            total_customers: customers.len(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> Vec<MetricCard> {
        vec![
            MetricCard {
                heading: "Order This Month",
                value: self.orders_this_month.to_string(),
            },
            MetricCard {
                heading: "Revenue This Month",
                value: format_usd(self.revenue_this_month),
            },
            MetricCard {
                heading: "Active Products",
                value: self.active_products.to_string(),
            },
            MetricCard {
                heading: "Total Customers",
                value: self.total_customers.to_string(),
            },
        ]
    }
}

/// Revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// e.g. `"Jun 2025"`
    pub label: String,
    pub value: Decimal,
}

/// Revenue per month, oldest first.
#[must_use]
pub fn monthly_revenue(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<(i32, u32), (String, Decimal)> = BTreeMap::new();

    for order in orders {
        let key = (order.date.year(), order.date.month());
        let entry = by_month
            .entry(key)
            .or_insert_with(|| (order.date.format("%b %Y").to_string(), Decimal::ZERO));
        entry.1 += order.display_total();
    }

    by_month
        .into_values()
        .map(|(label, value)| MonthlyRevenue {
            label,
            value: round_cents(value),
        })
        .collect()
}

/// Products to flag in the low-stock warning panel.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock < LOW_STOCK_WARNING_THRESHOLD)
        .collect()
}
