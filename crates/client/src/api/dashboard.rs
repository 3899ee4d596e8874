//! Multi-resource fetches: the dashboard and the order form.
//!
//! Each view needs several lists at once, so they are fetched concurrently
//! and the first failure wins.

use chrono::Utc;
use ioms_core::dashboard::{self, Metrics, MonthlyRevenue};
use ioms_core::draft::selectable_catalog;
use ioms_core::{Customer, Order, OrderFilter, OrderId, Product};
use serde::Serialize;
use tracing::instrument;

use super::PageRequest;
use crate::client::ApiClient;
use crate::error::ApiError;

/// Everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub metrics: Metrics,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub low_stock: Vec<Product>,
    pub top_selling: Vec<Product>,
    pub recent_orders: Vec<Order>,
}

/// Choices offered by the create/edit order form.
#[derive(Debug, Clone, Serialize)]
pub struct OrderFormData {
    pub customers: Vec<Customer>,
    /// Active products, plus those already on the order being edited.
    pub catalog: Vec<Product>,
    /// The order being edited, if any.
    pub editing: Option<Order>,
}

impl ApiClient {
    /// Fetch and aggregate the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the first error from any of the underlying requests.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        let (orders, products, customers, top_selling, recent_orders) = tokio::try_join!(
            self.list_orders(PageRequest::All, OrderFilter::All),
            self.list_products(PageRequest::All, None),
            self.list_customers(PageRequest::All),
            self.top_selling_products(),
            self.recent_orders(),
        )?;

        let orders = orders.into_results();
        let products = products.into_results();
        let customers = customers.into_results();

        Ok(Dashboard {
            metrics: Metrics::compute(&orders, &products, &customers, Utc::now()),
            monthly_revenue: dashboard::monthly_revenue(&orders),
            low_stock: dashboard::low_stock(&products).into_iter().cloned().collect(),
            top_selling,
            recent_orders,
        })
    }

    /// Fetch the customers and product catalog for the order form.
    ///
    /// When `editing` is set, the order is fetched alongside and its products
    /// stay selectable even if inactive.
    ///
    /// # Errors
    ///
    /// Returns the first error from any of the underlying requests.
    #[instrument(skip(self))]
    pub async fn order_form_data(
        &self,
        editing: Option<OrderId>,
    ) -> Result<OrderFormData, ApiError> {
        let editing_order = async {
            match editing {
                Some(id) => self.get_order(id).await.map(Some),
                None => Ok(None),
            }
        };

        let (customers, products, editing) = tokio::try_join!(
            self.list_customers(PageRequest::All),
            self.list_products(PageRequest::All, None),
            editing_order,
        )?;

        Ok(OrderFormData {
            customers: customers.into_results(),
            catalog: selectable_catalog(products.into_results(), editing.as_ref()),
            editing,
        })
    }
}
