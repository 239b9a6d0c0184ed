//! Core types for Storepulse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod email;
pub mod id;
pub mod status;
pub mod tenant;

pub use email::{Email, EmailError};
pub use id::*;
pub use status::TenantStatus;
pub use tenant::{SessionUser, Tenant, tenant_name_from_domain};
