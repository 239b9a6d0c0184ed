//! Storepulse Core - Shared types library.
//!
//! This crate provides common types used across all Storepulse components:
//! - `client` - Typed API adapter for the dashboard backend
//! - `session` - Authoritative session/tenant state store
//! - `cli` - Command-line dashboard frontend
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivation rules - no I/O, no
//! HTTP clients, no persistence. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses,
//!   plus the tenant view model and the monetary coercion policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
