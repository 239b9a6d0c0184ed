//! Integration tests for Storepulse.
//!
//! The actual tests live under `tests/` and drive the session store and API
//! adapter against an `httpmock` fake backend; this crate body only hosts
//! shared fixtures.
//!
//! # Test Categories
//!
//! - `session_flow` - Login, tenant fetch, persistence, stale-fetch guard
//! - `client_api` - Adapter endpoint coverage and normalization rules

#![cfg_attr(not(test), forbid(unsafe_code))]

use httpmock::MockServer;
use storepulse_client::{ClientConfig, DashboardClient};

/// Build a client pointed at a mock backend.
///
/// # Panics
///
/// Panics on invalid mock server URLs; fixtures only.
#[must_use]
pub fn client_for(server: &MockServer) -> DashboardClient {
    #[allow(clippy::unwrap_used)]
    let config = ClientConfig::with_base_url(&server.base_url()).unwrap();
    #[allow(clippy::unwrap_used)]
    DashboardClient::new(&config).unwrap()
}

/// A tenant record body as the backend serializes it.
#[must_use]
pub fn tenant_record_json(id: &str, shop_domain: &str, last_sync_at: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "shopDomain": shop_domain,
        "contactEmail": "owner@example.com",
        "createdAt": "2024-01-01T00:00:00Z",
        "lastSyncAt": last_sync_at,
    })
}
