//! Persisted session blob.
//!
//! One named JSON file holding exactly the rehydratable subset of session
//! state: `{token, user, tenants, selected_tenant_id}`. Loaded once at
//! store construction, rewritten after every mutation. Writes go to a
//! uniquely named sibling temp file first and are renamed into place, so a
//! crash mid-write never leaves a truncated blob and concurrent saves never
//! steal each other's temp file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SessionError;
use crate::store::SessionState;

/// Process-wide counter making each temp file name unique.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Handle to the on-disk session blob.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: Arc<PathBuf>,
}

impl SessionFile {
    /// Create a handle for the blob at `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Path of the blob on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, or the empty default when the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] when the file exists but cannot be
    /// read, and [`SessionError::Corrupt`] when it is not valid JSON.
    pub async fn load(&self) -> Result<SessionState, SessionError> {
        match tokio::fs::read_to_string(self.path.as_ref()).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SessionState::default()),
            Err(e) => Err(SessionError::Storage(e)),
        }
    }

    /// Write the state to disk, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] on filesystem failures.
    pub async fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = serde_json::to_string_pretty(state)?;
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.path.with_extension(format!("json.tmp{seq}"));
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, self.path.as_ref()).await?;
        Ok(())
    }
}
