//! Customer operations.

use ioms_core::forms::CustomerForm;
use ioms_core::{Customer, CustomerId, Page};
use reqwest::{Method, StatusCode};
use tracing::instrument;

use super::{PageRequest, list_url};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Customers per server-side page.
pub const CUSTOMER_PAGE_SIZE: u64 = 10;

impl ApiClient {
    /// List customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unusable.
    #[instrument(skip(self))]
    pub async fn list_customers(&self, page: PageRequest) -> Result<Page<Customer>, ApiError> {
        let url = self.endpoint(&list_url("/customers/", page, None));
        self.get_json(&url, "customers").await
    }

    /// Get a customer, including their orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        let url = self.endpoint(&format!("/customers/{id}/"));
        self.get_json(&url, &format!("customer {id}")).await
    }

    /// Validate the form and create a customer. Succeeds only on 201.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation.
    #[instrument(skip(self, form))]
    pub async fn create_customer(&self, form: &CustomerForm) -> Result<Customer, ApiError> {
        let input = form.validate()?;
        let url = self.endpoint("/customers/");
        let customer: Customer = self
            .send_json(Method::POST, &url, &input, &[StatusCode::CREATED], "customers")
            .await?;
        tracing::info!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    /// Validate the form and replace a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation and
    /// `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self, form), fields(customer_id = %id))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        form: &CustomerForm,
    ) -> Result<Customer, ApiError> {
        let input = form.validate()?;
        let url = self.endpoint(&format!("/customers/{id}/"));
        self.send_json(
            Method::PUT,
            &url,
            &input,
            &[StatusCode::OK],
            &format!("customer {id}"),
        )
        .await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the customer does not exist.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/customers/{id}/"));
        self.delete(&url, &format!("customer {id}")).await
    }
}
