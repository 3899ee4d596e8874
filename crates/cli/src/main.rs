//! IOMS CLI - admin console for the inventory and order backend.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept for one hour)
//! ioms signin -e admin@example.com -p 'correct horse'
//!
//! # Products that are running low
//! ioms products list --all --filter "low stock"
//!
//! # Create an order for customer 3: two of product 7, one of product 9
//! ioms orders create --customer 3 --item 7:2 --item 9:1
//!
//! # Dashboard metrics
//! ioms dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `IOMS_API_BASE_URL` - Backend base URL (or `--base-url`)
//! - `IOMS_SESSION_PATH` - Session file (default: `.ioms/session.json`)
//! - `IOMS_LOG_JSON` - Emit JSON log lines when set
//! - `SENTRY_DSN` - Enables Sentry error tracking
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use ioms_client::{ApiClient, ClientConfig, FileSessionStore, Route, session};
use ioms_core::forms::{SignInForm, SignUpForm};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::CliError;
use config::TelemetryConfig;

#[derive(Parser)]
#[command(name = "ioms")]
#[command(author, version, about = "IOMS admin console")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "IOMS_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store a session
    Signin {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "IOMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a new admin account
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(short, long, env = "IOMS_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
    },
    /// Delete the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show what the session guard decides for a console path
    Route {
        /// e.g. `/orders/12`
        path: String,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: commands::customers::CustomerAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Show dashboard metrics, revenue, low stock and recent orders
    Dashboard,
}

impl Commands {
    /// The console view this command stands in for.
    fn route(&self) -> Option<Route> {
        match self {
            Self::Signin { .. } => Some(Route::SignIn),
            Self::Signup { .. } => Some(Route::SignUp),
            Self::Logout | Self::Route { .. } => None,
            Self::Whoami | Self::Dashboard => Some(Route::Dashboard),
            Self::Products { action } => Some(action.route()),
            Self::Customers { action } => Some(action.route()),
            Self::Orders { action } => Some(action.route()),
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &TelemetryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            send_default_pii: false,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &TelemetryConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ioms_client=info,ioms_cli=info".into());

    // Logs go to stderr so stdout stays clean JSON output
    let json = config.log_json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let telemetry = TelemetryConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&telemetry);
    init_tracing(&telemetry);

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        if let CliError::Api(api) = &e
            && api.is_unauthenticated()
        {
            tracing::info!("Run `ioms signin` to start a new session");
        }
        std::process::exit(1);
    }
}

fn load_config(base_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_lookup(|key| match (key, base_url) {
        ("IOMS_API_BASE_URL", Some(url)) => Some(url.to_string()),
        _ => std::env::var(key).ok(),
    })?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.base_url.as_deref())?;
    let store = Arc::new(FileSessionStore::new(&config.session_path));

    if session::sweep_expired(store.as_ref())? {
        tracing::info!("Session expired, sign in again");
    }

    if let Some(route) = cli.command.route() {
        commands::guard(store.as_ref(), &route)?;
    }

    let client = ApiClient::new(config, store)?;

    match cli.command {
        Commands::Signin { email, password } => {
            commands::auth::sign_in(&client, &SignInForm { email, password }).await
        }
        Commands::Signup {
            name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                name,
                email,
                phone_number: phone,
                password,
                confirm_password,
            };
            commands::auth::sign_up(&client, &form).await
        }
        Commands::Logout => commands::auth::logout(&client),
        Commands::Whoami => commands::auth::whoami(&client),
        Commands::Route { path } => commands::show_route(client.store(), &path),
        Commands::Products { action } => commands::products::run(&client, action).await,
        Commands::Customers { action } => commands::customers::run(&client, action).await,
        Commands::Orders { action } => commands::orders::run(&client, action).await,
        Commands::Dashboard => commands::dashboard::run(&client).await,
    }
}
