//! IOMS Core - Shared types library.
//!
//! This crate provides the types shared by the IOMS console components:
//! - `client` - Typed REST client with session handling
//! - `cli` - The `ioms` command-line console
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session storage. Everything the backend owns (stock,
//! pricing, totals) is modelled here but never decided here.
//!
//! # Modules
//!
//! - [`types`] - IDs, statuses, entities, pagination and money helpers
//! - [`forms`] - Field validation for sign-in, sign-up, product, customer and order forms
//! - [`draft`] - Turning a validated order form into a request payload
//! - [`dashboard`] - Display-only aggregation for the dashboard

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod draft;
pub mod forms;
pub mod types;

pub use types::*;
