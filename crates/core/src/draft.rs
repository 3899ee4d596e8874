//! Order-draft composition.
//!
//! The order form collects a customer, a status and `(product id, quantity)`
//! pairs. Before anything is sent, the draft is checked against the product
//! catalog the form was populated from and turned into an [`OrderPayload`]
//! carrying each product's current price. The backend re-validates stock and
//! recomputes totals; this layer only catches what the form can already see.

use chrono::{DateTime, Utc};

use crate::forms::OrderFormItem;
use crate::types::{CustomerId, Order, OrderLine, OrderPayload, OrderStatus, Product, ProductId};

/// A shape-validated order form, see [`crate::forms::OrderForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer: CustomerId,
    pub status: OrderStatus,
    pub items: Vec<OrderFormItem>,
}

/// Why a draft could not be composed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Product with id {0} not found")]
    UnknownProduct(String),

    #[error("Product \"{0}\" is out of stock")]
    OutOfStock(String),

    #[error("Ordered quantity for \"{name}\" exceeds available stock ({available})")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },
}

/// Compose the request body for a draft.
///
/// Lines keep the order they were entered in. Every line is priced from the
/// catalog entry with the same id.
///
/// # Errors
///
/// Stops at the first line whose product is unknown, out of stock, or short
/// of the requested quantity.
pub fn compose(
    draft: &OrderDraft,
    catalog: &[Product],
    now: DateTime<Utc>,
) -> Result<OrderPayload, DraftError> {
    let mut lines = Vec::with_capacity(draft.items.len());

    for item in &draft.items {
        let product = item
            .id
            .parse::<ProductId>()
            .ok()
            .and_then(|id| catalog.iter().find(|p| p.id == id))
            .ok_or_else(|| DraftError::UnknownProduct(item.id.clone()))?;

        if product.stock == 0 {
            return Err(DraftError::OutOfStock(product.name.clone()));
        }
        if item.quantity > product.stock {
            return Err(DraftError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: item.quantity,
            });
        }

        lines.push(OrderLine {
            product_id: product.id,
            quantity: item.quantity,
            price_at_order_time: product.price,
        });
    }

    Ok(OrderPayload {
        id: None,
        customer: draft.customer,
        customer_id: draft.customer,
        status: draft.status,
        date: now,
        items: lines,
    })
}

/// Products offered by the order form.
///
/// Only active products can be picked for a new order. When editing, the
/// products already on the order stay selectable even if they have since
/// been deactivated.
#[must_use]
pub fn selectable_catalog(products: Vec<Product>, editing: Option<&Order>) -> Vec<Product> {
    let mut catalog: Vec<Product> = products.into_iter().filter(Product::is_selectable).collect();

    if let Some(order) = editing {
        for item in &order.items {
            if !catalog.iter().any(|p| p.id == item.product.id) {
                catalog.push(item.product.clone());
            }
        }
    }

    catalog
}

/// Pre-fill the order form from an existing order.
#[must_use]
pub fn draft_from_order(order: &Order) -> OrderDraft {
    OrderDraft {
        customer: order.customer.id,
        status: order.status,
        items: order
            .items
            .iter()
            .map(|item| OrderFormItem {
                id: item.product.id.to_string(),
                quantity: item.quantity.max(1),
            })
            .collect(),
    }
}
