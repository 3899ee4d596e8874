//! Integration tests for the IOMS client.
//!
//! Each test starts a `wiremock` server standing in for the backend and
//! points an [`ApiClient`] at it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ioms-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth` - sign-in, sign-up, logout
//! - `token_refresh` - the 401 refresh-and-retry interceptor
//! - `resources` - products, customers, orders, dashboard
//! - `session_guard` - persisted sessions, expiry sweep, route guard

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use ioms_client::session::{self, SESSION_TTL_MS};
use ioms_client::{ApiClient, ClientConfig, MemorySessionStore, Session, SessionStore, SessionUser};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Access token held by [`TestBackend::signed_in`].
pub const ACCESS: &str = "access-1";
/// Refresh token held by [`TestBackend::signed_in`].
pub const REFRESH: &str = "refresh-1";

/// A mock backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub client: ApiClient,
}

#[allow(clippy::unwrap_used)]
impl TestBackend {
    /// Backend with no session stored.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemorySessionStore::new());
        let config = ClientConfig::new(&server.uri()).unwrap();
        let client = ApiClient::new(config, Arc::clone(&store) as Arc<dyn SessionStore>).unwrap();
        Self {
            server,
            store,
            client,
        }
    }

    /// Backend with a fresh session holding [`ACCESS`] and [`REFRESH`].
    ///
    /// # Panics
    ///
    /// Panics if the session cannot be stored.
    pub async fn signed_in() -> Self {
        let backend = Self::new().await;
        backend.store.set(&session_expiring_at(session::now_ms() + SESSION_TTL_MS)).unwrap();
        backend
    }

    /// Currently stored session, if any.
    ///
    /// # Panics
    ///
    /// Panics if the store fails.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.store.get().unwrap()
    }
}

/// A session with the standard test tokens.
#[must_use]
pub fn session_expiring_at(expires_at: i64) -> Session {
    Session::new(
        SecretString::from(ACCESS),
        SecretString::from(REFRESH),
        SessionUser {
            email: "admin@ioms.dev".to_string(),
            full_name: "Ada Admin".to_string(),
            phone_number: "5551234567".to_string(),
        },
        expires_at,
    )
}

/// Product as the backend serializes it. Prices are decimal strings.
#[must_use]
pub fn product_json(id: i64, name: &str, price: &str, stock: u32, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "SKU": format!("SKU-{id}"),
        "price": price,
        "stock": stock,
        "status": status,
        "units_sold": 0,
        "created_by": "admin@ioms.dev",
        "created_at": "2025-01-02T10:00:00Z",
        "updated_at": "2025-01-02T10:00:00Z"
    })
}

#[must_use]
pub fn customer_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("customer{id}@example.com"),
        "phone": "5550001111",
        "address": "1 Main St",
        "orders": [],
        "created_by": "admin@ioms.dev"
    })
}

/// Order for customer 1 with one line of `quantity` x product 1 at `price`.
#[must_use]
pub fn order_json(id: i64, date: &str, price: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "order_id": "8f1c2a4e-6f3b-4b7a-9d2e-1a2b3c4d5e6f",
        "date": date,
        "customer": customer_json(1, "Grace Hopper"),
        "status": "pending",
        "total_items": quantity,
        "items": [{
            "id": id * 10,
            "product": product_json(1, "Widget", price, 50, "active"),
            "quantity": quantity,
            "price_at_order_time": price
        }],
        "created_by": "admin@ioms.dev"
    })
}

/// Paginated envelope around `results`.
#[must_use]
pub fn paginated(count: u64, next: Option<&str>, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results
    })
}
