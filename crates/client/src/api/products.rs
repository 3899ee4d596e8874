//! Product operations.

use ioms_core::forms::ProductForm;
use ioms_core::{Page, Product, ProductFilter, ProductId, ProductInput};
use reqwest::{Method, StatusCode};
use tracing::instrument;

use super::{PageRequest, list_url};
use crate::client::ApiClient;
use crate::error::ApiError;

/// Products per server-side page.
pub const PRODUCT_PAGE_SIZE: u64 = 10;

impl ApiClient {
    /// List products, optionally filtered by status or stock level.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unusable.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: PageRequest,
        filter: Option<ProductFilter>,
    ) -> Result<Page<Product>, ApiError> {
        let url = self.endpoint(&list_url(
            "/products/",
            page,
            filter.map(ProductFilter::as_query_value),
        ));
        self.get_json(&url, "products").await
    }

    /// The five best-selling products, by units sold.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unusable.
    #[instrument(skip(self))]
    pub async fn top_selling_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("/products/?top=true");
        let page: Page<Product> = self.get_json(&url, "products").await?;
        Ok(page.into_results())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("/products/{id}/"));
        self.get_json(&url, &format!("product {id}")).await
    }

    /// Validate the form and create a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation.
    #[instrument(skip(self, form))]
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ApiError> {
        let input = form.validate()?;
        self.create_product_input(&input).await
    }

    /// Create a product from an already validated input.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the input.
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product_input(&self, input: &ProductInput) -> Result<Product, ApiError> {
        let url = self.endpoint("/products/");
        let product: Product = self
            .send_json(
                Method::POST,
                &url,
                input,
                &[StatusCode::OK, StatusCode::CREATED],
                "products",
            )
            .await?;
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Validate the form and replace a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the form fails validation and
    /// `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        form: &ProductForm,
    ) -> Result<Product, ApiError> {
        let input = form.validate()?;
        let url = self.endpoint(&format!("/products/{id}/"));
        self.send_json(
            Method::PUT,
            &url,
            &input,
            &[StatusCode::OK],
            &format!("product {id}"),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/products/{id}/"));
        self.delete(&url, &format!("product {id}")).await?;
        tracing::info!("Deleted product");
        Ok(())
    }
}
