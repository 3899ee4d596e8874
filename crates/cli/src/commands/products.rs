//! `ioms products ...`

use clap::{Args, Subcommand};
use ioms_client::api::PRODUCT_PAGE_SIZE;
use ioms_client::{ApiClient, PageRequest, Route};
use ioms_core::forms::ProductForm;
use ioms_core::{ProductFilter, ProductId};
use serde_json::json;

use super::{CliError, print_json, print_page};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Fetch every product instead of one page
        #[arg(long)]
        all: bool,
        /// `active`, `inactive`, `low stock` or `out of stock`
        #[arg(long)]
        filter: Option<ProductFilter>,
    },
    /// The five best sellers
    Top,
    /// Show one product
    Get { id: ProductId },
    /// Create a product
    Create(ProductFields),
    /// Update a product; omitted fields keep their current value
    Update {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    /// Mark the product inactive
    #[arg(long, conflicts_with = "active")]
    inactive: bool,
    /// Mark the product active
    #[arg(long)]
    active: bool,
}

impl ProductFields {
    fn apply(self, mut form: ProductForm) -> ProductForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(sku) = self.sku {
            form.sku = sku;
        }
        if let Some(stock) = self.stock {
            form.stock = stock;
        }
        if self.inactive {
            form.active = false;
        } else if self.active {
            form.active = true;
        }
        form
    }
}

impl ProductAction {
    pub const fn route(&self) -> Route {
        match self {
            Self::List { .. } => Route::Products,
            Self::Top => Route::Dashboard,
            Self::Get { id } | Self::Delete { id } => Route::ProductDetail(*id),
            Self::Create(_) => Route::NewProduct,
            Self::Update { id, .. } => Route::EditProduct(*id),
        }
    }
}

pub async fn run(client: &ApiClient, action: ProductAction) -> Result<(), CliError> {
    match action {
        ProductAction::List { page, all, filter } => {
            let request = if all {
                PageRequest::All
            } else {
                PageRequest::Page(page)
            };
            let page = client.list_products(request, filter).await?;
            print_page(&page, PRODUCT_PAGE_SIZE)
        }
        ProductAction::Top => print_json(&client.top_selling_products().await?),
        ProductAction::Get { id } => {
            let product = client.get_product(id).await?;
            print_json(&json!({
                "product": product,
                "stock_label": product.stock_label(),
            }))
        }
        ProductAction::Create(fields) => {
            let form = fields.apply(ProductForm::default());
            print_json(&client.create_product(&form).await?)
        }
        ProductAction::Update { id, fields } => {
            let current = client.get_product(id).await?;
            let form = fields.apply(ProductForm::from(&current));
            print_json(&client.update_product(id, &form).await?)
        }
        ProductAction::Delete { id } => {
            client.delete_product(id).await?;
            print_json(&json!({ "deleted": id, "next": Route::Products.path() }))
        }
    }
}
