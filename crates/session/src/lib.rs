//! Storepulse session store.
//!
//! The single authoritative holder of session state: bearer token, operator
//! identity, known tenants, and the current selection. Consumers receive a
//! cloned [`SessionStore`] handle (shared `Arc` state, no ambient globals)
//! and read via snapshots; every mutation is atomic behind an async
//! `RwLock` and schedules a fire-and-forget write of the persisted blob.
//!
//! The store depends on the API adapter; the adapter knows nothing about
//! the store.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
mod persist;
mod store;

pub use error::SessionError;
pub use persist::SessionFile;
pub use store::{SessionState, SessionStore};
