//! Order types: what the backend returns and what the console sends.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Customer, CustomerId, OrderId, OrderItemId, OrderStatus, Product, ProductId};

/// An order as returned by `/orders/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_id: Uuid,
    pub date: DateTime<Utc>,
    pub customer: Customer,
    pub status: OrderStatus,
    /// Server-computed item count.
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Display-only total. The server's figures are authoritative.
    #[must_use]
    pub fn display_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// A line on a stored order, with the price captured when it was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    pub price_at_order_time: Decimal,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price_at_order_time * Decimal::from(self.quantity)
    }
}

/// Body for `POST /orders/` and `PUT /orders/{id}/`.
///
/// `customer` and `customer_id` carry the same value; the backend reads the
/// latter and older deployments read the former.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer: CustomerId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}

impl OrderPayload {
    /// Display-only total of the composed lines.
    #[must_use]
    pub fn display_total(&self) -> Decimal {
        self.items.iter().map(OrderLine::line_total).sum()
    }
}

/// A requested line on an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_order_time: Decimal,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price_at_order_time * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn order_json() -> serde_json::Value {
        json!({
            "id": 41,
            "order_id": "6f1c1f4e-4c57-4f0e-9a53-0a4b1b6f3d10",
            "date": "2025-06-14T08:00:00Z",
            "customer": {
                "id": 5,
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "5551234567",
                "address": "12 Analytical Way",
                "orders": []
            },
            "status": "shipped",
            "total_items": 3,
            "items": [
                {
                    "id": 1,
                    "product": {"id": 3, "name": "Widget", "SKU": "W-3", "price": "9.99", "stock": 8, "status": "active"},
                    "quantity": 2,
                    "price_at_order_time": "9.99"
                },
                {
                    "id": 2,
                    "product": {"id": 4, "name": "Gear", "SKU": "G-4", "price": "5.00", "stock": 0, "status": "inactive"},
                    "quantity": 1,
                    "price_at_order_time": "4.50"
                }
            ]
        })
    }

    #[test]
    fn test_deserialize_order_with_nested_customer() {
        let order: Order = serde_json::from_value(order_json()).unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.customer.name, "Ada Lovelace");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.display_total(), Decimal::from_str("24.48").unwrap());
    }

    #[test]
    fn test_payload_price_is_a_json_number() {
        let payload = OrderPayload {
            id: None,
            customer: CustomerId::new(5),
            customer_id: CustomerId::new(5),
            status: OrderStatus::Pending,
            date: DateTime::parse_from_rfc3339("2025-06-14T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            items: vec![OrderLine {
                product_id: ProductId::new(3),
                quantity: 2,
                price_at_order_time: Decimal::from_str("9.99").unwrap(),
            }],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(
            value["items"],
            json!([{"product_id": 3, "quantity": 2, "price_at_order_time": 9.99}])
        );
    }
}
