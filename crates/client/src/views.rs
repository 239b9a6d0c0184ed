//! Client-facing view models.
//!
//! Everything a dashboard surface needs to render, already normalized:
//! amounts are finite `f64`s (default 0), display names are derived, and
//! optional wire fields are filled with their documented defaults.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use storepulse_core::{CustomerId, OrderId, ProductId};

/// Currency assumed when the backend omits one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Synthetic status stamped on recent orders; the feed endpoint does not
/// report one.
pub const RECENT_ORDER_STATUS: &str = "synced";

/// Aggregated overview for one tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewMetrics {
    pub total_customers: u64,
    pub total_orders: u64,
    pub total_products: u64,
    pub total_revenue: f64,
    /// `total_revenue / total_orders`, or `0` when there are no orders.
    pub average_order_value: f64,
    pub last_sync_at: Option<DateTime<Utc>>,
}

/// One day of order volume and revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMetric {
    pub date: NaiveDate,
    pub orders: u64,
    pub revenue: f64,
}

/// One ranked customer with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub id: CustomerId,
    /// Space-joined first/last name, falling back to the email address.
    pub name: String,
    pub email: String,
    pub total_spent: f64,
}

/// One order in the recent-orders feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: OrderId,
    pub order_number: String,
    pub total_price: f64,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub status: String,
}

/// One catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub shop_product_id: Option<i64>,
    pub title: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
