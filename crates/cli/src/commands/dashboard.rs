//! `ioms dashboard`

use ioms_client::ApiClient;
use serde_json::json;

use super::{CliError, print_json};

pub async fn run(client: &ApiClient) -> Result<(), CliError> {
    let dashboard = client.dashboard().await?;

    print_json(&json!({
        "cards": dashboard.metrics.cards(),
        "monthly_revenue": dashboard.monthly_revenue,
        "low_stock": dashboard
            .low_stock
            .iter()
            .map(|p| json!({ "id": p.id, "name": p.name, "stock": p.stock_label() }))
            .collect::<Vec<_>>(),
        "top_selling": dashboard.top_selling,
        "recent_orders": dashboard.recent_orders,
    }))
}
