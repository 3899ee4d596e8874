//! IOMS client library.
//!
//! Typed access to the IOMS inventory and order backend, with the session
//! lifecycle the admin console relies on:
//!
//! - [`session`] - the single persisted session record, expiry sweep and
//!   token accessor
//! - [`guard`] - console routes and the session guard in front of them
//! - [`ApiClient`] - HTTP client that refreshes an expired access token
//!   once and retries once on `401`
//! - [`api`] - products, customers, orders and dashboard fetches
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ioms_client::{ApiClient, ClientConfig, FileSessionStore};
//!
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(FileSessionStore::new(&config.session_path));
//! let client = ApiClient::new(config, store)?;
//! let recent = client.recent_orders().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
mod auth;
mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;

pub use api::{Dashboard, OrderFormData, PageRequest};
pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, AuthError};
pub use guard::{Route, RouteDecision};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionUser};
