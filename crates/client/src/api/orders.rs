//! Order operations.

use chrono::Utc;
use ioms_core::draft::{self, OrderDraft};
use ioms_core::forms::OrderForm;
use ioms_core::{Order, OrderFilter, OrderId, OrderPayload, Page, Product};
use reqwest::{Method, StatusCode};
use tracing::instrument;

use super::{PageRequest, list_url};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Orders per server-side page.
pub const ORDER_PAGE_SIZE: u64 = 4;

impl ApiClient {
    /// List orders, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unusable.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        page: PageRequest,
        filter: OrderFilter,
    ) -> Result<Page<Order>, ApiError> {
        let url = self.endpoint(&list_url("/orders/", page, filter.as_query_value()));
        self.get_json(&url, "orders").await
    }

    /// Up to ten most recently created orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unusable.
    #[instrument(skip(self))]
    pub async fn recent_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint("/orders/recent/");
        let page: Page<Order> = self.get_json(&url, "orders").await?;
        Ok(page.into_results())
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&format!("/orders/{id}/"));
        self.get_json(&url, &format!("order {id}")).await
    }

    /// Validate the form, price it against `catalog` and create the order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation and
    /// `ApiError::InvalidOrder` if a line does not fit the catalog.
    #[instrument(skip(self, form, catalog))]
    pub async fn create_order(
        &self,
        form: &OrderForm,
        catalog: &[Product],
    ) -> Result<Order, ApiError> {
        let payload = compose(&form.validate()?, catalog)?;
        self.create_order_payload(&payload).await
    }

    /// Create an order from a composed payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the payload,
    /// e.g. because stock changed in the meantime.
    #[instrument(skip(self, payload), fields(lines = payload.items.len()))]
    pub async fn create_order_payload(&self, payload: &OrderPayload) -> Result<Order, ApiError> {
        let url = self.endpoint("/orders/");
        let order: Order = self
            .send_json(
                Method::POST,
                &url,
                payload,
                &[StatusCode::OK, StatusCode::CREATED],
                "orders",
            )
            .await?;
        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    /// Validate the form, price it against `catalog` and replace the order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` or `ApiError::InvalidOrder` before
    /// sending, and `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self, form, catalog), fields(order_id = %id))]
    pub async fn update_order(
        &self,
        id: OrderId,
        form: &OrderForm,
        catalog: &[Product],
    ) -> Result<Order, ApiError> {
        let mut payload = compose(&form.validate()?, catalog)?;
        payload.id = Some(id);

        let url = self.endpoint(&format!("/orders/{id}/"));
        self.send_json(
            Method::PUT,
            &url,
            &payload,
            &[StatusCode::OK],
            &format!("order {id}"),
        )
        .await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/orders/{id}/"));
        self.delete(&url, &format!("order {id}")).await
    }
}

fn compose(draft: &OrderDraft, catalog: &[Product]) -> Result<OrderPayload, ApiError> {
    Ok(draft::compose(draft, catalog, Utc::now())?)
}
