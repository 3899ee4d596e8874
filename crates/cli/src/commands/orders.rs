//! `ioms orders ...`

use clap::Subcommand;
use ioms_client::api::ORDER_PAGE_SIZE;
use ioms_client::{ApiClient, PageRequest, Route};
use ioms_core::draft::draft_from_order;
use ioms_core::forms::{OrderForm, OrderFormItem};
use ioms_core::{OrderFilter, OrderId, format_usd};
use serde_json::json;

use super::{CliError, print_json, print_page};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Fetch every order instead of one page
        #[arg(long)]
        all: bool,
        /// `all` or one of pending, processing, shipped, delivered, canceled
        #[arg(long, default_value = "all")]
        status: OrderFilter,
    },
    /// The ten most recent orders
    Recent,
    /// Show one order
    Get { id: OrderId },
    /// Create an order
    Create {
        /// Customer ID
        #[arg(long)]
        customer: String,
        /// Order status (default: pending)
        #[arg(long, default_value = "")]
        status: String,
        /// Product line as `<product id>:<quantity>`; repeatable
        #[arg(long = "item")]
        items: Vec<String>,
    },
    /// Update an order; omitted options keep their current value
    Update {
        id: OrderId,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Replaces all lines when given; repeatable
        #[arg(long = "item")]
        items: Vec<String>,
    },
    /// Delete an order
    Delete { id: OrderId },
}

impl OrderAction {
    pub const fn route(&self) -> Route {
        match self {
            Self::List { .. } => Route::Orders,
            Self::Recent => Route::Dashboard,
            Self::Get { id } | Self::Delete { id } => Route::OrderDetail(*id),
            Self::Create { .. } => Route::NewOrder,
            Self::Update { id, .. } => Route::EditOrder(*id),
        }
    }
}

/// Parse `7:2` (or `7`, meaning one) into a form line.
fn parse_item(raw: &str) -> Result<OrderFormItem, CliError> {
    let (id, quantity) = raw.split_once(':').unwrap_or((raw, "1"));
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| CliError::InvalidArgument(format!("bad quantity in item {raw:?}")))?;
    Ok(OrderFormItem {
        id: id.trim().to_string(),
        quantity,
    })
}

fn parse_items(raw: &[String]) -> Result<Vec<OrderFormItem>, CliError> {
    raw.iter().map(|item| parse_item(item)).collect()
}

pub async fn run(client: &ApiClient, action: OrderAction) -> Result<(), CliError> {
    match action {
        OrderAction::List { page, all, status } => {
            let request = if all {
                PageRequest::All
            } else {
                PageRequest::Page(page)
            };
            print_page(&client.list_orders(request, status).await?, ORDER_PAGE_SIZE)
        }
        OrderAction::Recent => print_json(&client.recent_orders().await?),
        OrderAction::Get { id } => {
            let order = client.get_order(id).await?;
            print_json(&json!({
                "total": format_usd(order.display_total()),
                "order": order,
            }))
        }
        OrderAction::Create {
            customer,
            status,
            items,
        } => {
            let form = OrderForm {
                customer,
                status,
                items: parse_items(&items)?,
            };
            let data = client.order_form_data(None).await?;
            print_json(&client.create_order(&form, &data.catalog).await?)
        }
        OrderAction::Update {
            id,
            customer,
            status,
            items,
        } => {
            let data = client.order_form_data(Some(id)).await?;
            let current = data
                .editing
                .as_ref()
                .map(draft_from_order)
                .ok_or_else(|| CliError::InvalidArgument(format!("order {id} not loaded")))?;

            let form = OrderForm {
                customer: customer.unwrap_or_else(|| current.customer.to_string()),
                status: status.unwrap_or_else(|| current.status.to_string()),
                items: if items.is_empty() {
                    current.items
                } else {
                    parse_items(&items)?
                },
            };
            print_json(&client.update_order(id, &form, &data.catalog).await?)
        }
        OrderAction::Delete { id } => {
            client.delete_order(id).await?;
            print_json(&json!({ "deleted": id, "next": Route::Orders.path() }))
        }
    }
}
