//! Command handlers.

use storepulse_core::{EmailError, TenantId};
use storepulse_session::{SessionError, SessionStore};
use thiserror::Error;

pub mod metrics;
pub mod products;
pub mod session;

/// Errors that can occur while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Session store operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Backend call failed.
    #[error(transparent)]
    Client(#[from] storepulse_client::ClientError),

    /// The email argument is not a valid address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A date argument is not `yyyy-mm-dd`.
    #[error("invalid date '{0}': expected yyyy-mm-dd")]
    InvalidDate(String),

    /// A tenant-scoped command was run with no tenant selected.
    #[error("no tenant selected; run 'storepulse tenants switch <id>' first")]
    NoTenantSelected,

    /// Terminal interaction failed (e.g., password prompt).
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Resolve the token and selected tenant id for a tenant-scoped command.
pub(crate) async fn require_tenant(
    store: &SessionStore,
) -> Result<(String, TenantId), CommandError> {
    let token = store.token().await?;
    let tenant_id = store
        .snapshot()
        .await
        .selected_tenant_id
        .ok_or(CommandError::NoTenantSelected)?;
    Ok((token, tenant_id))
}
