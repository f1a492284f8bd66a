//! Demo admin dashboard data.
//!
//! The dashboard runs entirely on mock data: the order history comes from
//! [`MemoryDocumentStore::with_sample_data`] and the sales chart is a
//! hard-coded series. This is intentional scaffolding for the demo - nothing
//! here models real persistence, and nothing in the cart or pricing core
//! depends on it.
//!
//! [`MemoryDocumentStore::with_sample_data`]: crate::documents::MemoryDocumentStore::with_sample_data

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sticker_craft_core::Price;

use crate::documents::{DocumentStore, DocumentStoreError};
use crate::identity::AuthUser;

/// Demo admin rule: anyone on the `admin.com` domain.
#[must_use]
pub fn is_admin(user: &AuthUser) -> bool {
    user.email.domain() == "admin.com"
}

/// One month of the demo sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    pub value: u32,
}

/// Hard-coded series behind the dashboard's sales chart.
pub const MONTHLY_SALES: &[MonthlySales] = &[
    MonthlySales { month: "Jan", value: 400 },
    MonthlySales { month: "Feb", value: 300 },
    MonthlySales { month: "Mar", value: 600 },
    MonthlySales { month: "Apr", value: 800 },
    MonthlySales { month: "May", value: 700 },
    MonthlySales { month: "Jun", value: 900 },
];

/// Aggregates shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_orders: usize,
    pub total_revenue: Price,
    pub average_order_value: Price,
    pub monthly_sales: Vec<MonthlySales>,
}

/// Compute the dashboard aggregates from the order history.
///
/// # Errors
///
/// Returns a [`DocumentStoreError`] if the order history cannot be read.
pub fn dashboard_snapshot(
    documents: &dyn DocumentStore,
) -> Result<DashboardSnapshot, DocumentStoreError> {
    let orders = documents.all_orders()?;

    let revenue: Decimal = orders.iter().map(|order| order.amount.amount()).sum();
    let average = if orders.is_empty() {
        Decimal::ZERO
    } else {
        (revenue / Decimal::from(orders.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    Ok(DashboardSnapshot {
        total_orders: orders.len(),
        total_revenue: Price::from_decimal(revenue),
        average_order_value: Price::from_decimal(average),
        monthly_sales: MONTHLY_SALES.to_vec(),
    })
}
