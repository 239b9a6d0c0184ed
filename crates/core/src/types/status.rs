//! Tenant synchronization status.

use serde::{Deserialize, Serialize};

/// Synchronization status of a connected storefront.
///
/// A tenant is `Connected` once the backend reports a successful sync
/// (`lastSyncAt` present), `Syncing` while the first ingestion is still
/// running, and `Error` when a sync attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Connected,
    #[default]
    Syncing,
    Error,
}

impl TenantStatus {
    /// Returns the lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Syncing => "syncing",
            Self::Error => "error",
        }
    }
}

impl core::fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
