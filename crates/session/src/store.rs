//! The session store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use storepulse_client::DashboardClient;
use storepulse_client::conversions::convert_tenant;
use storepulse_core::{Email, SessionUser, Tenant, TenantId, TenantStatus};

use crate::error::SessionError;
use crate::persist::SessionFile;

/// The rehydratable subset of session state.
///
/// This struct is serialized verbatim as the persisted blob, so it holds
/// exactly the fields that survive a restart - transient loading/error
/// flags belong to individual consumers and never appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token; present iff authenticated.
    pub token: Option<String>,
    /// Display identity of the logged-in operator.
    pub user: Option<SessionUser>,
    /// Known tenants, ordered, unique by id.
    pub tenants: Vec<Tenant>,
    /// Currently selected tenant; absent or matching an entry in `tenants`.
    pub selected_tenant_id: Option<TenantId>,
}

/// Authoritative session/tenant store.
///
/// Cloning yields another handle to the same shared state; pass handles to
/// consumers instead of reaching for globals. Mutations take the write lock
/// for their full duration, so callers never observe partial state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    client: DashboardClient,
    storage: Option<SessionFile>,
    state: RwLock<SessionState>,
    /// Generation counter for tenant fetches. A response is applied only if
    /// no newer fetch was issued while it was in flight, so a slow stale
    /// response can never overwrite a fresher tenant list.
    fetch_generation: AtomicU64,
    /// Sequence counter for persistence. Each scheduled write carries the
    /// sequence it was issued under; a write that has been superseded by a
    /// newer snapshot is dropped instead of hitting the disk.
    persist_seq: AtomicU64,
    /// Serializes blob writes so an older snapshot can never land after a
    /// newer one.
    persist_lock: Mutex<()>,
}

impl SessionStore {
    /// Create a store with no persistence (state lives only in memory).
    #[must_use]
    pub fn new(client: DashboardClient) -> Self {
        Self::build(client, None, SessionState::default())
    }

    /// Create a store backed by `storage`, rehydrating any persisted state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] or [`SessionError::Corrupt`] when
    /// the blob exists but cannot be loaded.
    pub async fn with_storage(
        client: DashboardClient,
        storage: SessionFile,
    ) -> Result<Self, SessionError> {
        let state = storage.load().await?;
        Ok(Self::build(client, Some(storage), state))
    }

    fn build(client: DashboardClient, storage: Option<SessionFile>, state: SessionState) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                client,
                storage,
                state: RwLock::new(state),
                fetch_generation: AtomicU64::new(0),
                persist_seq: AtomicU64::new(0),
                persist_lock: Mutex::new(()),
            }),
        }
    }

    /// The API adapter this store talks to.
    #[must_use]
    pub fn client(&self) -> &DashboardClient {
        &self.inner.client
    }

    /// A point-in-time copy of the full session state.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.state.read().await.clone()
    }

    /// The bearer token, or [`SessionError::NotAuthenticated`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when logged out.
    pub async fn token(&self) -> Result<String, SessionError> {
        self.inner
            .state
            .read()
            .await
            .token
            .clone()
            .ok_or(SessionError::NotAuthenticated)
    }

    /// The currently selected tenant, when one is selected and known.
    pub async fn selected_tenant(&self) -> Option<Tenant> {
        let state = self.inner.state.read().await;
        let selected = state.selected_tenant_id.as_ref()?;
        state.tenants.iter().find(|t| &t.id == selected).cloned()
    }

    /// Authenticate and populate the session.
    ///
    /// On success the token is stored, the operator identity is derived
    /// from the email local part, and the tenant list is fetched as an
    /// immediate follow-up. A rejected login leaves prior state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Auth`] when the credentials are rejected and
    /// [`SessionError::Api`] when the follow-up tenant fetch fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &str) -> Result<(), SessionError> {
        let auth = self
            .inner
            .client
            .login(email.as_str(), password)
            .await
            .map_err(SessionError::Auth)?;

        {
            let mut state = self.inner.state.write().await;
            state.token = Some(auth.token);
            state.user = Some(SessionUser::from_email(email.clone()));
            self.persist(&state);
        }

        self.fetch_tenants().await
    }

    /// Clear the whole session. Idempotent.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let mut state = self.inner.state.write().await;
        *state = SessionState::default();
        self.persist(&state);
    }

    /// Refresh the tenant list from the backend.
    ///
    /// Replaces `tenants` wholesale and selects the first tenant only when
    /// nothing was selected before. A response that raced with a newer
    /// fetch is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] without touching existing
    /// tenants when no token is present, or [`SessionError::Api`] when the
    /// backend call fails.
    #[instrument(skip(self))]
    pub async fn fetch_tenants(&self) -> Result<(), SessionError> {
        let token = self.token().await?;
        let generation = self.inner.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let records = self.inner.client.tenants(&token).await?;
        let tenants: Vec<Tenant> = records.into_iter().map(convert_tenant).collect();

        let mut state = self.inner.state.write().await;
        if self.inner.fetch_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale tenant list response");
            return Ok(());
        }

        state.tenants = tenants;
        if state.selected_tenant_id.is_none() {
            state.selected_tenant_id = state.tenants.first().map(|t| t.id.clone());
        }
        self.persist(&state);
        Ok(())
    }

    /// Upsert a tenant by id: replace the matching entry in place, else
    /// append. Selects the tenant when nothing was selected before.
    #[instrument(skip(self, tenant), fields(tenant_id = %tenant.id))]
    pub async fn add_tenant(&self, tenant: Tenant) {
        let mut state = self.inner.state.write().await;
        if state.selected_tenant_id.is_none() {
            state.selected_tenant_id = Some(tenant.id.clone());
        }
        if let Some(existing) = state.tenants.iter_mut().find(|t| t.id == tenant.id) {
            *existing = tenant;
        } else {
            state.tenants.push(tenant);
        }
        self.persist(&state);
    }

    /// Remove a tenant by id. Clears the selection when the removed tenant
    /// was selected; never auto-selects another.
    #[instrument(skip(self), fields(tenant_id = %id))]
    pub async fn remove_tenant(&self, id: &TenantId) {
        let mut state = self.inner.state.write().await;
        state.tenants.retain(|t| &t.id != id);
        if state.selected_tenant_id.as_ref() == Some(id) {
            state.selected_tenant_id = None;
        }
        self.persist(&state);
    }

    /// Select a tenant unconditionally. No validation that the id is known;
    /// callers are expected to pass ids they obtained from this store.
    #[instrument(skip(self), fields(tenant_id = %id))]
    pub async fn set_selected_tenant(&self, id: TenantId) {
        let mut state = self.inner.state.write().await;
        state.selected_tenant_id = Some(id);
        self.persist(&state);
    }

    /// Patch one tenant's status in place. No-op when the id is unknown.
    #[instrument(skip(self), fields(tenant_id = %id, status = %status))]
    pub async fn update_tenant_status(&self, id: &TenantId, status: TenantStatus) {
        let mut state = self.inner.state.write().await;
        if let Some(tenant) = state.tenants.iter_mut().find(|t| &t.id == id) {
            tenant.status = status;
            self.persist(&state);
        }
    }

    /// Schedule a fire-and-forget write of the blob. Failures are logged,
    /// never surfaced; the in-memory state is already authoritative.
    ///
    /// Writes are serialized behind a lock and stamped with a sequence
    /// number taken while the state lock is held, so snapshot order matches
    /// mutation order. A write that was superseded before it ran is dropped;
    /// the blob on disk always converges to the newest snapshot.
    fn persist(&self, state: &SessionState) {
        if self.inner.storage.is_none() {
            return;
        }
        let seq = self.inner.persist_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let blob = state.clone();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let _guard = inner.persist_lock.lock().await;
            if inner.persist_seq.load(Ordering::SeqCst) != seq {
                return;
            }
            if let Some(storage) = &inner.storage {
                if let Err(error) = storage.save(&blob).await {
                    tracing::warn!(%error, path = %storage.path().display(), "failed to persist session state");
                }
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storepulse_client::{ClientConfig, DashboardClient};

    use super::*;

    /// A client pointing nowhere; fine for operations that never hit HTTP.
    fn offline_client() -> DashboardClient {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9").unwrap();
        DashboardClient::new(&config).unwrap()
    }

    fn tenant(id: &str, name: &str) -> Tenant {
        Tenant {
            id: TenantId::new(id),
            name: name.to_owned(),
            domain: format!("{id}.myshopify.com"),
            status: TenantStatus::Syncing,
            last_sync: None,
            email: None,
        }
    }

    #[tokio::test]
    async fn test_add_tenant_selects_first() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;
        store.add_tenant(tenant("t-2", "Two")).await;

        let state = store.snapshot().await;
        assert_eq!(state.tenants.len(), 2);
        assert_eq!(state.selected_tenant_id, Some(TenantId::new("t-1")));
    }

    #[tokio::test]
    async fn test_add_tenant_upserts_in_place() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;
        store.add_tenant(tenant("t-2", "Two")).await;
        store.add_tenant(tenant("t-1", "One Renamed")).await;

        let state = store.snapshot().await;
        assert_eq!(state.tenants.len(), 2);
        assert_eq!(state.tenants[0].name, "One Renamed");
        assert_eq!(state.tenants[1].name, "Two");
    }

    #[tokio::test]
    async fn test_remove_selected_tenant_clears_selection() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;
        store.add_tenant(tenant("t-2", "Two")).await;

        store.remove_tenant(&TenantId::new("t-1")).await;

        let state = store.snapshot().await;
        assert_eq!(state.tenants.len(), 1);
        // No auto-reselect.
        assert_eq!(state.selected_tenant_id, None);
    }

    #[tokio::test]
    async fn test_remove_other_tenant_keeps_selection() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;
        store.add_tenant(tenant("t-2", "Two")).await;

        store.remove_tenant(&TenantId::new("t-2")).await;

        let state = store.snapshot().await;
        assert_eq!(state.selected_tenant_id, Some(TenantId::new("t-1")));
    }

    #[tokio::test]
    async fn test_set_selected_tenant_is_unvalidated() {
        let store = SessionStore::new(offline_client());
        store.set_selected_tenant(TenantId::new("ghost")).await;

        let state = store.snapshot().await;
        assert_eq!(state.selected_tenant_id, Some(TenantId::new("ghost")));
        assert!(store.selected_tenant().await.is_none());
    }

    #[tokio::test]
    async fn test_update_tenant_status() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;

        store
            .update_tenant_status(&TenantId::new("t-1"), TenantStatus::Error)
            .await;
        store
            .update_tenant_status(&TenantId::new("missing"), TenantStatus::Connected)
            .await;

        let state = store.snapshot().await;
        assert_eq!(state.tenants[0].status, TenantStatus::Error);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;
        store.logout().await;
        store.logout().await; // idempotent

        assert_eq!(store.snapshot().await, SessionState::default());
    }

    #[tokio::test]
    async fn test_fetch_tenants_requires_token() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;

        let err = store.fetch_tenants().await.unwrap_err();
        assert!(matches!(err, SessionError::NotAuthenticated));
        // Existing tenants untouched.
        assert_eq!(store.snapshot().await.tenants.len(), 1);
    }

    #[tokio::test]
    async fn test_selected_tenant_lookup() {
        let store = SessionStore::new(offline_client());
        store.add_tenant(tenant("t-1", "One")).await;

        let selected = store.selected_tenant().await.unwrap();
        assert_eq!(selected.name, "One");
    }

    #[tokio::test]
    async fn test_rapid_mutations_persist_the_latest_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));
        let store = SessionStore::with_storage(offline_client(), file.clone())
            .await
            .unwrap();

        // A burst of overlapping mutations; every one schedules a write.
        for i in 0..50 {
            store.add_tenant(tenant(&format!("t-{i}"), "Shop")).await;
        }
        store.set_selected_tenant(TenantId::new("t-49")).await;

        let expected = store.snapshot().await;
        for _ in 0..200 {
            if file.load().await.ok().as_ref() == Some(&expected) {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("blob never converged to the newest session state");
    }

    #[tokio::test]
    async fn test_rehydrates_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::new(dir.path().join("session.json"));

        let state = SessionState {
            token: Some("tok-9".to_owned()),
            user: Some(SessionUser::from_email(
                Email::parse("ada@example.com").unwrap(),
            )),
            tenants: vec![tenant("t-1", "One")],
            selected_tenant_id: Some(TenantId::new("t-1")),
        };
        file.save(&state).await.unwrap();

        let store = SessionStore::with_storage(offline_client(), file)
            .await
            .unwrap();
        assert_eq!(store.snapshot().await, state);
        assert_eq!(store.token().await.unwrap(), "tok-9");
    }
}
