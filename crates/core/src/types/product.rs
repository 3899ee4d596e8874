//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductId, ProductStatus};

/// A product as returned by `/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Stock keeping unit, unique per backend.
    #[serde(rename = "SKU")]
    pub sku: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub units_sold: u32,
    /// Email of the user that created the product.
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product can be placed on a new order.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// Stock label used by the product table, e.g. `"4 (Low)"`.
    #[must_use]
    pub fn stock_label(&self) -> String {
        match self.stock {
            0 => "Out of stock".to_string(),
            n if n <= super::LOW_STOCK_LIMIT => format!("{n} (Low)"),
            n => n.to_string(),
        }
    }
}

/// Body for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    pub price: Decimal,
    pub stock: u32,
    pub status: ProductStatus,
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            stock: product.stock,
            status: product.status,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_deserialize_backend_product() {
        let json = r#"{
            "id": 3,
            "name": "Widget",
            "SKU": "WID-3",
            "price": "9.99",
            "stock": 4,
            "status": "active",
            "units_sold": 12,
            "created_by": "owner@shop.io",
            "created_at": "2025-05-01T09:30:00.123456Z",
            "updated_at": "2025-05-02T10:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.sku, "WID-3");
        assert_eq!(product.price, Decimal::from_str("9.99").unwrap());
        assert_eq!(product.stock_label(), "4 (Low)");
        assert!(product.is_selectable());
    }

    #[test]
    fn test_input_uses_uppercase_sku_key() {
        let input = ProductInput {
            name: "Gadget".to_string(),
            sku: "GAD-1".to_string(),
            price: Decimal::from_str("12.50").unwrap(),
            stock: 0,
            status: ProductStatus::Inactive,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["SKU"], "GAD-1");
        assert_eq!(value["status"], "inactive");
    }
}
