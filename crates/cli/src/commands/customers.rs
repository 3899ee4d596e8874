//! `ioms customers ...`

use clap::{Args, Subcommand};
use ioms_client::api::CUSTOMER_PAGE_SIZE;
use ioms_client::{ApiClient, PageRequest, Route};
use ioms_core::CustomerId;
use ioms_core::forms::CustomerForm;
use serde_json::json;

use super::{CliError, print_json, print_page};

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List customers
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Fetch every customer instead of one page
        #[arg(long)]
        all: bool,
    },
    /// Show one customer with their orders
    Get { id: CustomerId },
    /// Create a customer
    Create(CustomerFields),
    /// Update a customer; omitted fields keep their current value
    Update {
        id: CustomerId,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer
    Delete { id: CustomerId },
}

#[derive(Args)]
pub struct CustomerFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

impl CustomerFields {
    fn apply(self, mut form: CustomerForm) -> CustomerForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(email) = self.email {
            form.email = email;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
        if let Some(address) = self.address {
            form.address = address;
        }
        form
    }
}

impl CustomerAction {
    pub const fn route(&self) -> Route {
        match self {
            Self::List { .. } => Route::Customers,
            Self::Get { id } | Self::Delete { id } => Route::CustomerDetail(*id),
            Self::Create(_) => Route::NewCustomer,
            Self::Update { id, .. } => Route::EditCustomer(*id),
        }
    }
}

pub async fn run(client: &ApiClient, action: CustomerAction) -> Result<(), CliError> {
    match action {
        CustomerAction::List { page, all } => {
            let request = if all {
                PageRequest::All
            } else {
                PageRequest::Page(page)
            };
            print_page(&client.list_customers(request).await?, CUSTOMER_PAGE_SIZE)
        }
        CustomerAction::Get { id } => print_json(&client.get_customer(id).await?),
        CustomerAction::Create(fields) => {
            let form = fields.apply(CustomerForm::default());
            print_json(&client.create_customer(&form).await?)
        }
        CustomerAction::Update { id, fields } => {
            let current = client.get_customer(id).await?;
            let form = fields.apply(CustomerForm::from(&current));
            print_json(&client.update_customer(id, &form).await?)
        }
        CustomerAction::Delete { id } => {
            client.delete_customer(id).await?;
            print_json(&json!({ "deleted": id, "next": Route::Customers.path() }))
        }
    }
}
