//! CLI command implementations.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use ioms_client::session::SessionError;
use ioms_client::{ApiError, ConfigError, Route, RouteDecision, SessionStore, guard};
use ioms_core::Page;
use serde::Serialize;
use thiserror::Error;

/// Errors that end a CLI invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// The guard turned the command away.
    #[error("Not signed in, redirecting to {0}")]
    Redirect(Route),

    #[error("Unknown console path: {0}")]
    UnknownRoute(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Run the session guard for `route`.
///
/// # Errors
///
/// Returns `CliError::Redirect` when the route needs a session and there is none.
pub fn guard(store: &dyn SessionStore, route: &Route) -> Result<(), CliError> {
    match guard::check(store, route) {
        RouteDecision::Render(_) => Ok(()),
        RouteDecision::Redirect(to) => Err(CliError::Redirect(to)),
    }
}

/// `ioms route <path>`: report the guard's decision without acting on it.
pub fn show_route(store: &dyn SessionStore, path: &str) -> Result<(), CliError> {
    let route = Route::parse(path).ok_or_else(|| CliError::UnknownRoute(path.to_string()))?;

    let (decision, target) = match guard::check(store, &route) {
        RouteDecision::Render(_) => ("render", route),
        RouteDecision::Redirect(to) => ("redirect", to),
    };

    print_json(&serde_json::json!({
        "route": route.path(),
        "protected": route.is_protected(),
        "decision": decision,
        "target": target.path(),
    }))
}

/// Print one list page along with the page count for `page_size`.
pub fn print_page<T: Serialize>(page: &Page<T>, page_size: u64) -> Result<(), CliError> {
    print_json(&serde_json::json!({
        "count": page.count,
        "pages": page.total_pages(page_size),
        "next": page.next,
        "previous": page.previous,
        "results": page.results,
    }))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}
