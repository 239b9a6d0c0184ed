//! Storepulse API adapter.
//!
//! Translates each backend capability into one typed call on
//! [`DashboardClient`]. Every response arrives wrapped in the uniform
//! envelope `{success, data, message?}`; the adapter unwraps it, maps wire
//! DTOs into view models, and surfaces failures as [`ClientError`].
//!
//! The adapter is stateless apart from the shared `reqwest` connection pool:
//! it holds no session, performs no retries, and knows nothing about the
//! session store layered above it.
//!
//! # Example
//!
//! ```rust,ignore
//! use storepulse_client::{ClientConfig, DashboardClient};
//!
//! let client = DashboardClient::new(&ClientConfig::from_env()?)?;
//! let auth = client.login("ada@example.com", "hunter2").await?;
//! let tenants = client.tenants(&auth.token).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
pub mod config;
pub mod conversions;
pub mod dto;
mod error;
pub mod views;

pub use client::DashboardClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
