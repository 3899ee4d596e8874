//! Status enums and list filters for products and orders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Product;

/// Stock level at or below which a product counts as "low stock".
pub const LOW_STOCK_LIMIT: u32 = 10;

/// Error returned when a status or filter string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct StatusParseError {
    kind: &'static str,
    value: String,
}

impl StatusParseError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Whether a product can be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    /// Wire value used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(StatusParseError::new("product status", s)),
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Canceled,
    ];

    /// Wire value used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| StatusParseError::new("order status", s))
    }
}

/// Product list filter understood by `GET /products/?status=`.
///
/// The stock-based filters are evaluated server-side:
/// low stock is `1..=10` units, out of stock is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductFilter {
    Active,
    Inactive,
    LowStock,
    OutOfStock,
}

impl ProductFilter {
    /// Query parameter value, before percent-encoding.
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::LowStock => "low stock",
            Self::OutOfStock => "out of stock",
        }
    }

    /// Client-side mirror of the server's filter contract.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::Active => product.status == ProductStatus::Active,
            Self::Inactive => product.status == ProductStatus::Inactive,
            Self::LowStock => (1..=LOW_STOCK_LIMIT).contains(&product.stock),
            Self::OutOfStock => product.stock == 0,
        }
    }
}

impl FromStr for ProductFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "low stock" => Ok(Self::LowStock),
            "out of stock" => Ok(Self::OutOfStock),
            _ => Err(StatusParseError::new("product filter", s)),
        }
    }
}

/// Order list filter. `All` sends no `status` parameter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    /// Query parameter value, if any.
    #[must_use]
    pub const fn as_query_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Status(status) => Some(status.as_str()),
        }
    }
}

impl FromStr for OrderFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all orders") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<OrderStatus>()
            .map(Self::Status)
            .map_err(|_| StatusParseError::new("order filter", s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_case_insensitive() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" CANCELED ".parse::<OrderStatus>().unwrap(), OrderStatus::Canceled);
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }

    fn product(status: &str, stock: u32) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Bolt",
            "SKU": "BLT-1",
            "price": "0.25",
            "stock": stock,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_low_stock_contract() {
        let filter = ProductFilter::LowStock;
        assert!(!filter.matches(&product("active", 0)));
        assert!(filter.matches(&product("active", 1)));
        assert!(filter.matches(&product("inactive", 10)));
        assert!(!filter.matches(&product("active", 11)));
    }

    #[test]
    fn test_status_filters() {
        assert!(ProductFilter::Active.matches(&product("active", 0)));
        assert!(!ProductFilter::Active.matches(&product("inactive", 5)));
        assert!(ProductFilter::Inactive.matches(&product("inactive", 5)));
        assert!(ProductFilter::OutOfStock.matches(&product("inactive", 0)));
        assert!(!ProductFilter::OutOfStock.matches(&product("active", 1)));
    }

    #[test]
    fn test_product_filter_parsing() {
        assert_eq!("low-stock".parse::<ProductFilter>().unwrap(), ProductFilter::LowStock);
        assert_eq!("Out of Stock".parse::<ProductFilter>().unwrap(), ProductFilter::OutOfStock);
        assert_eq!(ProductFilter::LowStock.as_query_value(), "low stock");
    }

    #[test]
    fn test_order_filter_all_has_no_param() {
        assert_eq!("All Orders".parse::<OrderFilter>().unwrap(), OrderFilter::All);
        assert_eq!(OrderFilter::All.as_query_value(), None);
        assert_eq!(
            "delivered".parse::<OrderFilter>().unwrap().as_query_value(),
            Some("delivered")
        );
    }
}
