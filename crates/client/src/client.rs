//! HTTP client for the dashboard backend.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, de::DeserializeOwned};
use storepulse_core::TenantId;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::conversions::{
    convert_order_point, convert_overview, convert_product, convert_recent_order,
    convert_top_customer,
};
use crate::dto::{
    AuthResponse, CreateProductRequest, LoginRequest, MetricsOverviewDto, OnboardTenantRequest,
    OrderMetricsPointDto, ProductDto, RecentOrderDto, TenantRecord, TopCustomerDto,
};
use crate::error::ClientError;
use crate::views::{OrderMetric, OverviewMetrics, ProductRecord, RecentOrder, TopCustomer};

/// Date format the backend expects for metric ranges.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Uniform response envelope every backend endpoint uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Typed client for the dashboard backend REST API.
///
/// Stateless beyond the shared connection pool; holds no token. Cloning is
/// cheap and shares the underlying `reqwest` client.
#[derive(Clone)]
pub struct DashboardClient {
    inner: Arc<DashboardClientInner>,
}

struct DashboardClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash; paths are appended verbatim.
    base_url: String,
}

impl DashboardClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(DashboardClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            }),
        })
    }

    /// Authenticate an operator.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Request`] on invalid credentials.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!(LoginRequest { email, password })),
            &[],
        )
        .await
    }

    /// Onboard a new tenant for the authenticated principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the shop credentials.
    #[instrument(skip(self, token, access_token))]
    pub async fn onboard_tenant(
        &self,
        token: &str,
        shop_domain: &str,
        access_token: &str,
        contact_email: &str,
    ) -> Result<TenantRecord, ClientError> {
        self.request(
            Method::POST,
            "/api/tenants/onboard",
            Some(token),
            Some(serde_json::json!(OnboardTenantRequest {
                shop_domain,
                access_token,
                contact_email,
            })),
            &[],
        )
        .await
    }

    /// List tenant records for the authenticated principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn tenants(&self, token: &str) -> Result<Vec<TenantRecord>, ClientError> {
        self.request(Method::GET, "/api/tenants", Some(token), None, &[])
            .await
    }

    /// Fetch aggregated overview metrics for one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn overview_metrics(
        &self,
        token: &str,
        tenant_id: &TenantId,
    ) -> Result<OverviewMetrics, ClientError> {
        let dto: MetricsOverviewDto = self
            .request(
                Method::GET,
                &format!("/api/{tenant_id}/metrics/overview"),
                Some(token),
                None,
                &[],
            )
            .await?;
        Ok(convert_overview(dto))
    }

    /// Fetch the per-day order series for a date range (inclusive).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn order_metrics(
        &self,
        token: &str,
        tenant_id: &TenantId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OrderMetric>, ClientError> {
        let from = from.format(DATE_FORMAT).to_string();
        let to = to.format(DATE_FORMAT).to_string();
        let points: Vec<OrderMetricsPointDto> = self
            .request(
                Method::GET,
                &format!("/api/{tenant_id}/metrics/orders"),
                Some(token),
                None,
                &[("from", from.as_str()), ("to", to.as_str())],
            )
            .await?;
        Ok(points.into_iter().map(convert_order_point).collect())
    }

    /// Fetch the highest-spending customers for one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn top_customers(
        &self,
        token: &str,
        tenant_id: &TenantId,
        limit: u32,
    ) -> Result<Vec<TopCustomer>, ClientError> {
        let limit = limit.to_string();
        let customers: Vec<TopCustomerDto> = self
            .request(
                Method::GET,
                &format!("/api/{tenant_id}/metrics/top-customers"),
                Some(token),
                None,
                &[("limit", limit.as_str())],
            )
            .await?;
        Ok(customers.into_iter().map(convert_top_customer).collect())
    }

    /// Fetch the most recent orders for one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn recent_orders(
        &self,
        token: &str,
        tenant_id: &TenantId,
        limit: u32,
    ) -> Result<Vec<RecentOrder>, ClientError> {
        let limit = limit.to_string();
        let orders: Vec<RecentOrderDto> = self
            .request(
                Method::GET,
                &format!("/api/{tenant_id}/metrics/recent-orders"),
                Some(token),
                None,
                &[("limit", limit.as_str())],
            )
            .await?;
        Ok(orders.into_iter().map(convert_recent_order).collect())
    }

    /// List the synced product catalog for one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn products(
        &self,
        token: &str,
        tenant_id: &TenantId,
    ) -> Result<Vec<ProductRecord>, ClientError> {
        let products: Vec<ProductDto> = self
            .request(
                Method::GET,
                &format!("/api/{tenant_id}/products"),
                Some(token),
                None,
                &[],
            )
            .await?;
        Ok(products.into_iter().map(convert_product).collect())
    }

    /// Create a product in one tenant's catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn create_product(
        &self,
        token: &str,
        tenant_id: &TenantId,
        product: CreateProductRequest,
    ) -> Result<ProductRecord, ClientError> {
        let dto: ProductDto = self
            .request(
                Method::POST,
                &format!("/api/{tenant_id}/products"),
                Some(token),
                Some(serde_json::json!(product)),
                &[],
            )
            .await?;
        Ok(convert_product(dto))
    }

    /// Trigger a backend synchronization for one tenant.
    ///
    /// Fire-and-forget from the caller's perspective; only the accept/reject
    /// outcome is reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the sync request.
    #[instrument(skip(self, token))]
    pub async fn trigger_sync(
        &self,
        token: Option<&str>,
        tenant_id: &TenantId,
    ) -> Result<(), ClientError> {
        let _: Option<serde_json::Value> = self
            .request_allow_empty(
                Method::POST,
                &format!("/api/tenants/{tenant_id}/sync"),
                token,
                None,
            )
            .await?;
        Ok(())
    }

    /// Issue one request and unwrap the response envelope, requiring `data`.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.client.request(method, &url);

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)
            .map_err(|_| ClientError::invalid_body(status.as_u16()))?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::request(status.as_u16(), envelope.message));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::invalid_body(status.as_u16()))
    }

    /// Like [`Self::request`] but tolerates an absent `data` field, for
    /// endpoints that acknowledge without a payload.
    async fn request_allow_empty(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, ClientError> {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.client.request(method, &url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|_| ClientError::invalid_body(status.as_u16()))?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::request(status.as_u16(), envelope.message));
        }

        Ok(envelope.data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn client_for(server: &MockServer) -> DashboardClient {
        let config = ClientConfig::with_base_url(&server.base_url()).unwrap();
        DashboardClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_login_unwraps_envelope() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/login")
                    .json_body(serde_json::json!({
                        "email": "ada@example.com",
                        "password": "hunter2",
                    }));
                then.status(200).json_body(serde_json::json!({
                    "success": true,
                    "data": {
                        "token": "tok-1",
                        "expiresInSeconds": 3600,
                        "userId": "u-1",
                        "role": "ADMIN",
                        "issuedAt": "2024-01-01T00:00:00Z",
                    },
                }));
            })
            .await;

        let client = client_for(&server);
        let auth = client.login("ada@example.com", "hunter2").await.unwrap();

        mock.assert_async().await;
        assert_eq!(auth.token, "tok-1");
        assert_eq!(auth.role, "ADMIN");
        assert_eq!(auth.tenant_id, None);
    }

    #[tokio::test]
    async fn test_error_envelope_surfaces_backend_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(401).json_body(serde_json::json!({
                    "success": false,
                    "data": null,
                    "message": "invalid credentials",
                }));
            })
            .await;

        let client = client_for(&server);
        let err = client.login("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[tokio::test]
    async fn test_success_false_with_ok_status_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tenants");
                then.status(200)
                    .json_body(serde_json::json!({ "success": false, "data": null }));
            })
            .await;

        let client = client_for(&server);
        let err = client.tenants("tok").await.unwrap_err();
        assert_eq!(err.to_string(), "request failed with status 200");
    }

    #[tokio::test]
    async fn test_non_json_body_is_request_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tenants");
                then.status(502).body("<html>bad gateway</html>");
            })
            .await;

        let client = client_for(&server);
        let err = client.tenants("tok").await.unwrap_err();
        assert!(matches!(err, ClientError::Request { status: 502, .. }));
        assert_eq!(err.to_string(), "invalid response body");
    }

    #[tokio::test]
    async fn test_tenants_sends_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/tenants")
                    .header("authorization", "Bearer tok-42");
                then.status(200)
                    .json_body(serde_json::json!({ "success": true, "data": [] }));
            })
            .await;

        let client = client_for(&server);
        let tenants = client.tenants("tok-42").await.unwrap();
        mock.assert_async().await;
        assert!(tenants.is_empty());
    }

    #[tokio::test]
    async fn test_order_metrics_formats_dates_and_coerces() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/t-1/metrics/orders")
                    .query_param("from", "2024-01-01")
                    .query_param("to", "2024-01-31");
                then.status(200).json_body(serde_json::json!({
                    "success": true,
                    "data": [
                        { "date": "2024-01-01", "orderCount": 3, "totalSales": 30.0 },
                        { "date": "2024-01-02", "orderCount": 1 },
                    ],
                }));
            })
            .await;

        let client = client_for(&server);
        let points = client
            .order_metrics(
                "tok",
                &TenantId::new("t-1"),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].orders, 3);
        // Missing totalSales coerces to 0, never NaN.
        assert!((points[1].revenue - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_trigger_sync_tolerates_empty_data() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/tenants/t-1/sync");
                then.status(202)
                    .json_body(serde_json::json!({ "success": true, "data": null }));
            })
            .await;

        let client = client_for(&server);
        client
            .trigger_sync(Some("tok"), &TenantId::new("t-1"))
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
