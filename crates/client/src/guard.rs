//! Console routes and the session guard in front of them.
//!
//! Every view except sign-in and sign-up requires a session record to be
//! present. The guard only checks presence; an expired record is caught by
//! the startup sweep or by the token accessor on the first API call.

use std::fmt;

use ioms_core::{CustomerId, OrderId, ProductId};

use crate::session::{Session, SessionStore};

/// A console view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Dashboard,
    Products,
    ProductDetail(ProductId),
    NewProduct,
    EditProduct(ProductId),
    Customers,
    CustomerDetail(CustomerId),
    NewCustomer,
    EditCustomer(CustomerId),
    Orders,
    OrderDetail(OrderId),
    NewOrder,
    EditOrder(OrderId),
}

impl Route {
    /// The view's path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::SignIn => "/admin/signin".to_string(),
            Self::SignUp => "/admin/signup".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::Products => "/products".to_string(),
            Self::ProductDetail(id) => format!("/products/{id}"),
            Self::NewProduct => "/products/new".to_string(),
            Self::EditProduct(id) => format!("/product/edit/{id}"),
            Self::Customers => "/customers".to_string(),
            Self::CustomerDetail(id) => format!("/customers/{id}"),
            Self::NewCustomer => "/customers/new".to_string(),
            Self::EditCustomer(id) => format!("/customer/edit/{id}"),
            Self::Orders => "/orders".to_string(),
            Self::OrderDetail(id) => format!("/orders/{id}"),
            Self::NewOrder => "/orders/new".to_string(),
            Self::EditOrder(id) => format!("/order/edit/{id}"),
        }
    }

    /// Whether the view requires a session.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::SignIn | Self::SignUp)
    }

    /// Resolve a path to a route. Returns `None` for unknown paths.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Dashboard,
            ["admin", "signin"] => Self::SignIn,
            ["admin", "signup"] => Self::SignUp,
            ["products"] => Self::Products,
            ["products", "new"] => Self::NewProduct,
            ["products", id] => Self::ProductDetail(id.parse().ok()?),
            ["product", "edit", id] => Self::EditProduct(id.parse().ok()?),
            ["customers"] => Self::Customers,
            ["customers", "new"] => Self::NewCustomer,
            ["customers", id] => Self::CustomerDetail(id.parse().ok()?),
            ["customer", "edit", id] => Self::EditCustomer(id.parse().ok()?),
            ["orders"] => Self::Orders,
            ["orders", "new"] => Self::NewOrder,
            ["orders", id] => Self::OrderDetail(id.parse().ok()?),
            ["order", "edit", id] => Self::EditOrder(id.parse().ok()?),
            _ => return None,
        };
        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of a guarded navigation.
#[derive(Debug)]
pub enum RouteDecision {
    /// Render the view. Carries the session when one is present.
    Render(Option<Session>),
    /// Navigate here instead, replacing the history entry.
    Redirect(Route),
}

impl RouteDecision {
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Decide whether `route` may render.
///
/// Unprotected routes always render. Protected routes render only when a
/// session record is present; otherwise the decision is a redirect to
/// sign-in. A store that cannot be read counts as no session.
pub fn check(store: &dyn SessionStore, route: &Route) -> RouteDecision {
    let session = match store.get() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "Session store unreadable, treating as signed out");
            None
        }
    };

    if !route.is_protected() {
        return RouteDecision::Render(session);
    }

    match session {
        Some(session) => RouteDecision::Render(Some(session)),
        None => {
            tracing::debug!(route = %route, "No session, redirecting to sign-in");
            RouteDecision::Redirect(Route::SignIn)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::session::{MemorySessionStore, SessionError, SessionUser, now_ms};

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self) -> Result<Option<Session>, SessionError> {
            Err(SessionError::Poisoned)
        }
        fn set(&self, _: &Session) -> Result<(), SessionError> {
            Err(SessionError::Poisoned)
        }
        fn clear(&self) -> Result<(), SessionError> {
            Err(SessionError::Poisoned)
        }
    }

    fn session() -> Session {
        Session::issue(
            SecretString::from("a"),
            SecretString::from("r"),
            SessionUser::default(),
            now_ms(),
        )
    }

    #[test]
    fn test_parse_and_path_agree() {
        let routes = [
            Route::SignIn,
            Route::SignUp,
            Route::Dashboard,
            Route::Products,
            Route::ProductDetail(ProductId::new(4)),
            Route::NewProduct,
            Route::EditProduct(ProductId::new(4)),
            Route::Customers,
            Route::CustomerDetail(CustomerId::new(2)),
            Route::NewCustomer,
            Route::EditCustomer(CustomerId::new(2)),
            Route::Orders,
            Route::OrderDetail(OrderId::new(9)),
            Route::NewOrder,
            Route::EditOrder(OrderId::new(9)),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route), "{route}");
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/products/abc"), None);
        assert_eq!(Route::parse("/orders/9/"), Some(Route::OrderDetail(OrderId::new(9))));
    }

    #[test]
    fn test_protected_without_session_redirects() {
        let store = MemorySessionStore::new();
        let decision = check(&store, &Route::Orders);
        assert!(matches!(decision, RouteDecision::Redirect(Route::SignIn)));
    }

    #[test]
    fn test_protected_with_session_renders() {
        let store = MemorySessionStore::with_session(session());
        let decision = check(&store, &Route::Dashboard);
        assert!(matches!(decision, RouteDecision::Render(Some(_))));
    }

    #[test]
    fn test_public_routes_always_render() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            check(&store, &Route::SignIn),
            RouteDecision::Render(None)
        ));
        assert!(!check(&BrokenStore, &Route::SignUp).is_redirect());
    }

    #[test]
    fn test_unreadable_store_redirects() {
        assert!(matches!(
            check(&BrokenStore, &Route::Products),
            RouteDecision::Redirect(Route::SignIn)
        ));
    }
}
