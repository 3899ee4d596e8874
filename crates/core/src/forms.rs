//! Field validation for the console's forms.
//!
//! Each form is a plain struct of raw text fields, exactly what a user typed.
//! `validate()` either yields the typed value the API layer sends, or a
//! [`ValidationErrors`] listing every failing field with a user-facing
//! message.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{
    Customer, CustomerId, CustomerInput, Email, OrderStatus, Product, ProductInput, ProductStatus,
};

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All failing fields of one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Errors in the order the fields were checked.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message reported for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

const MIN_PASSWORD_LENGTH: usize = 8;

fn check_email(errors: &mut ValidationErrors, raw: &str) -> Option<Email> {
    match Email::parse(raw) {
        Ok(email) => Some(email),
        Err(crate::types::EmailError::Empty) => {
            errors.push("email", "Email is required");
            None
        }
        Err(_) => {
            errors.push("email", "Enter a valid email address");
            None
        }
    }
}

fn check_password(errors: &mut ValidationErrors, raw: &str) {
    if raw.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Validated sign-in credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl SignInForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        match email {
            Some(email) => errors.finish(|| Credentials {
                email,
                password: self.password.clone(),
            }),
            None => Err(errors),
        }
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validated registration body for `POST /auth/register/`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: Email,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required");
        }
        let email = check_email(&mut errors, &self.email);
        let phone = self.phone_number.trim();
        if phone.is_empty() {
            errors.push("phone_number", "Phone number is required");
        }
        check_password(&mut errors, &self.password);
        if self.password != self.confirm_password {
            errors.push("confirm_password", "Passwords do not match");
        }
        match email {
            Some(email) => errors.finish(|| Registration {
                name: name.to_owned(),
                email,
                phone_number: phone.to_owned(),
                password: self.password.clone(),
                confirm_password: self.confirm_password.clone(),
            }),
            None => Err(errors),
        }
    }
}

/// Add/edit product form.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub sku: String,
    pub stock: String,
    /// Checkbox: active when set.
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            sku: String::new(),
            stock: String::new(),
            active: true,
        }
    }
}

/// Pre-fill the edit form from a stored product.
impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            sku: product.sku.clone(),
            stock: product.stock.to_string(),
            active: product.status == ProductStatus::Active,
        }
    }
}

impl ProductForm {
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<ProductInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required");
        }

        let price = self.price.trim();
        let parsed_price = if price.is_empty() {
            errors.push("price", "Price is required");
            None
        } else {
            match Decimal::from_str(price) {
                Ok(p) if p > Decimal::ZERO => Some(p),
                _ => {
                    errors.push("price", "Price must be a positive number");
                    None
                }
            }
        };

        let sku = self.sku.trim();
        if sku.is_empty() {
            errors.push("SKU", "SKU is required");
        }

        let stock = self.stock.trim();
        let parsed_stock = if stock.is_empty() {
            errors.push("stock", "Stock quantity is required");
            None
        } else if let Ok(n) = stock.parse::<u32>() {
            Some(n)
        } else {
            errors.push("stock", "Stock must be a non-negative integer");
            None
        };

        match (parsed_price, parsed_stock) {
            (Some(price), Some(stock)) => errors.finish(|| ProductInput {
                name: name.to_owned(),
                sku: sku.to_owned(),
                price,
                stock,
                status: if self.active {
                    ProductStatus::Active
                } else {
                    ProductStatus::Inactive
                },
            }),
            _ => Err(errors),
        }
    }
}

/// Add/edit customer form.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
        }
    }
}

impl CustomerForm {
    const MAX_NAME: usize = 100;
    const MAX_ADDRESS: usize = 255;
    const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<CustomerInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required");
        } else if name.chars().count() > Self::MAX_NAME {
            errors.push("name", "Name must be less than 100 characters");
        } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            errors.push("name", "Name must contain only letters and spaces");
        }

        let email = check_email(&mut errors, &self.email);

        let phone = self.phone.trim();
        if !Self::PHONE_DIGITS.contains(&phone.len()) {
            errors.push("phone", "Phone number must be 10 to 15 digits");
        } else if !phone.chars().all(|c| c.is_ascii_digit()) {
            errors.push("phone", "Phone must contain only digits");
        }

        let address = self.address.trim();
        if address.is_empty() {
            errors.push("address", "Address is required");
        } else if address.chars().count() > Self::MAX_ADDRESS {
            errors.push("address", "Address must be at most 255 characters");
        }

        match email {
            Some(email) => errors.finish(|| CustomerInput {
                name: name.to_owned(),
                email: email.into_inner(),
                phone: phone.to_owned(),
                address: address.to_owned(),
            }),
            None => Err(errors),
        }
    }
}

/// One product line selected on the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormItem {
    /// Product id as chosen from the product picker.
    pub id: String,
    pub quantity: u32,
}

/// Create/edit order form.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    pub customer: String,
    pub status: String,
    pub items: Vec<OrderFormItem>,
}

impl OrderForm {
    /// Validate field shapes. Stock checks happen when the draft is composed
    /// against the product catalog, see [`crate::draft::compose`].
    ///
    /// # Errors
    ///
    /// Returns every failing field.
    pub fn validate(&self) -> Result<crate::draft::OrderDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let customer = if self.customer.trim().is_empty() {
            errors.push("customer", "Customer is required");
            None
        } else if let Ok(id) = self.customer.parse::<CustomerId>() {
            Some(id)
        } else {
            errors.push("customer", "Customer is not valid");
            None
        };

        let status = if self.status.trim().is_empty() {
            Some(OrderStatus::default())
        } else if let Ok(status) = self.status.parse::<OrderStatus>() {
            Some(status)
        } else {
            errors.push("status", "Status is required");
            None
        };

        if self.items.is_empty() {
            errors.push("items", "Select at least one product");
        }
        if self.items.iter().any(|item| item.quantity < 1) {
            errors.push("items", "Minimum 1");
        }

        match (customer, status) {
            (Some(customer), Some(status)) => errors.finish(|| crate::draft::OrderDraft {
                customer,
                status,
                items: self.items.clone(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_requires_valid_email_and_long_password() {
        let form = SignInForm {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.message_for("email"), Some("Enter a valid email address"));
        assert_eq!(
            errors.message_for("password"),
            Some("Password must be at least 8 characters")
        );

        let ok = SignInForm {
            email: "admin@ioms.dev".to_string(),
            password: "correct horse".to_string(),
        };
        assert_eq!(ok.validate().unwrap().email.as_str(), "admin@ioms.dev");
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let form = SignUpForm {
            name: "Grace".to_string(),
            email: "grace@navy.mil".to_string(),
            phone_number: "5550000000".to_string(),
            password: "compilers1".to_string(),
            confirm_password: "compilers2".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].field, "confirm_password");
    }

    #[test]
    fn test_product_form_rules() {
        let form = ProductForm {
            name: String::new(),
            price: "-3".to_string(),
            sku: " ".to_string(),
            stock: "1.5".to_string(),
            active: true,
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "price", "SKU", "stock"]);

        let form = ProductForm {
            name: "Widget".to_string(),
            price: "9.99".to_string(),
            sku: "W-1".to_string(),
            stock: "0".to_string(),
            active: false,
        };
        let input = form.validate().unwrap();
        assert_eq!(input.stock, 0);
        assert_eq!(input.status, ProductStatus::Inactive);
    }

    #[test]
    fn test_customer_form_rules() {
        let form = CustomerForm {
            name: "R2 D2".to_string(),
            email: "droid@rebels.org".to_string(),
            phone: "12345".to_string(),
            address: "Tatooine".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.message_for("name"),
            Some("Name must contain only letters and spaces")
        );
        assert_eq!(
            errors.message_for("phone"),
            Some("Phone number must be 10 to 15 digits")
        );

        let form = CustomerForm {
            name: "Leia Organa".to_string(),
            email: "leia@rebels.org".to_string(),
            phone: "555123456789".to_string(),
            address: "Alderaan".to_string(),
        };
        assert_eq!(form.validate().unwrap().phone, "555123456789");
    }

    #[test]
    fn test_order_form_requires_items() {
        let form = OrderForm {
            customer: "4".to_string(),
            status: "Processing".to_string(),
            items: vec![],
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.message_for("items"), Some("Select at least one product"));

        let form = OrderForm {
            customer: String::new(),
            status: String::new(),
            items: vec![OrderFormItem {
                id: "3".to_string(),
                quantity: 0,
            }],
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.message_for("customer"), Some("Customer is required"));
        assert_eq!(errors.message_for("items"), Some("Minimum 1"));
    }
}
