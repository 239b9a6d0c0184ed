//! Wire DTOs for the dashboard backend.
//!
//! Field names mirror the backend's camelCase JSON. Money fields go through
//! the coercion policy in `storepulse_core::types::amount` so a missing or
//! malformed amount deserializes to `0.0` instead of failing the envelope.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use storepulse_core::types::amount;
use storepulse_core::{CustomerId, OrderId, ProductId, TenantId, UserId};

/// Request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Opaque bearer token for subsequent calls.
    pub token: String,
    /// Token lifetime as reported by the backend.
    pub expires_in_seconds: i64,
    /// Backend identifier of the principal.
    pub user_id: UserId,
    /// Tenant the principal is scoped to, when any.
    #[serde(default)]
    pub tenant_id: Option<TenantId>,
    /// Role of the principal (e.g., `ADMIN`).
    pub role: String,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
}

/// Request body for `POST /api/tenants/onboard`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardTenantRequest<'a> {
    pub shop_domain: &'a str,
    pub access_token: &'a str,
    pub contact_email: &'a str,
}

/// One tenant record as stored by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRecord {
    pub id: TenantId,
    pub shop_domain: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
}

/// Raw overview counts for one tenant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsOverviewDto {
    #[serde(default)]
    pub customer_count: u64,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub product_count: u64,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total_revenue: f64,
    #[serde(default)]
    pub last_sync_at: Option<DateTime<Utc>>,
}

/// One point in the per-day order series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderMetricsPointDto {
    pub date: NaiveDate,
    #[serde(default)]
    pub order_count: u64,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total_sales: f64,
}

/// One customer in the top-customers ranking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomerDto {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total_spent: f64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One order in the recent-orders feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderDto {
    pub id: OrderId,
    pub order_number: String,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub total_price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One catalog product synced from the storefront.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    #[serde(default)]
    pub shop_product_id: Option<i64>,
    pub title: String,
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub price: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api/{tenantId}/products`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_product_id: Option<i64>,
}
