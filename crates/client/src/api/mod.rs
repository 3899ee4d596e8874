//! Resource operations for the IOMS backend.
//!
//! Each submodule adds methods to [`ApiClient`](crate::ApiClient) for one
//! resource. All of them go through the refresh interceptor.

mod customers;
mod dashboard;
mod orders;
mod products;

pub use customers::CUSTOMER_PAGE_SIZE;
pub use dashboard::{Dashboard, OrderFormData};
pub use orders::ORDER_PAGE_SIZE;
pub use products::PRODUCT_PAGE_SIZE;

/// Which slice of a list endpoint to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// One server-side page, starting at 1.
    Page(u32),
    /// Every record, unpaginated.
    All,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Page(1)
    }
}

impl PageRequest {
    /// Leading query parameter for this request, without the `?`.
    fn query(self) -> String {
        match self {
            Self::Page(page) => format!("page={}", page.max(1)),
            Self::All => "all=true".to_string(),
        }
    }
}

/// Build `path?<page>[&status=<value>]`, percent-encoding the status.
fn list_url(path: &str, page: PageRequest, status: Option<&str>) -> String {
    let mut query = page.query();
    if let Some(status) = status {
        query.push_str("&status=");
        query.push_str(&urlencoding::encode(status));
    }
    format!("{path}?{query}")
}
