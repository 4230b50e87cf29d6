//! Scorebot - Telegram welcome relay and game score webhook
//!
//! One HTTP endpoint serves two callers: Telegram delivers bot updates, and
//! the companion web game submits score increments.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - MongoDB integration
//! - `bot` - Dispatcher, HTTP server and outbound Telegram messages
//! - `plugins` - Request flows (`/start`, score submission)
//! - `utils` - Utility functions

mod bot;
mod config;
mod database;
mod plugins;
mod utils;

use teloxide::adaptors::throttle::Limits;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bot::{AppState, Readiness, ThrottledBot};
use config::Config;
use database::{Database, ScoreRepository};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scorebot=info,teloxide=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Scorebot...");

    let port = config::listen_port();

    // Requests are only served after this check has run
    let readiness = match Config::from_env() {
        Ok(config) => match bootstrap(config).await {
            Ok(state) => Readiness::ready(state),
            Err(e) => {
                error!("Startup failed: {:#}", e);
                Readiness::failed(format!("{:#}", e))
            }
        },
        Err(e) => {
            error!("Configuration error: {}", e);
            Readiness::failed(e.to_string())
        }
    };

    if !readiness.is_ready() {
        error!("Serving configuration errors until restarted with a valid configuration");
    }

    bot::run(port, bot::router(readiness)).await
}

/// Build the application state from a loaded configuration.
async fn bootstrap(config: Config) -> anyhow::Result<AppState<ScoreRepository, ThrottledBot>> {
    info!("Configuration loaded successfully");
    info!("Project: {}", config.service_account.project_id);
    info!("Database endpoint: {}", config.database_url);

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;
    let store = ScoreRepository::new(&db);
    info!("Database ready ({})", config.mongodb_database);

    // Initialize bot with Throttle for automatic rate limiting
    let bot = Bot::new(&config.bot_token).throttle(Limits::default());
    info!("Bot initialized with rate limiting (Throttle)");

    if let Some(url) = &config.webhook_url {
        bot::register_webhook(&bot, url).await;
    }

    info!("Web app URL: {}", config.webapp_url);

    Ok(AppState {
        store,
        sender: bot,
        webapp_url: config.webapp_url,
    })
}
