//! Core types for the IOMS console.
//!
//! This module provides type-safe wrappers for the backend's resources.

pub mod customer;
pub mod email;
pub mod id;
pub mod order;
pub mod page;
pub mod price;
pub mod product;
pub mod status;

pub use customer::{Customer, CustomerInput, CustomerOrder};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderItem, OrderLine, OrderPayload};
pub use page::Page;
pub use price::{format_usd, round_cents};
pub use product::{Product, ProductInput};
pub use status::*;
