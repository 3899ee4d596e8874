//! Customer types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CustomerId, OrderId, OrderItem, OrderStatus};

/// A customer as returned by `/customers/`, including their order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub orders: Vec<CustomerOrder>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Order summary nested in a [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: OrderId,
    /// Public order reference.
    pub order_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Body for creating or replacing a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&Customer> for CustomerInput {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
        }
    }
}
