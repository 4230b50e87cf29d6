//! Configuration module for Scorebot.
//!
//! Loads configuration from environment variables. Loading happens once at
//! startup; a failure is reported as a [`ConfigError`] and the service then
//! answers every request with a configuration error instead of exiting.

use std::env;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Host suffix appended to the project id to form the database endpoint.
pub const DATABASE_HOST_SUFFIX: &str = "firebaseio.com";

/// Environment variable holding the service-account JSON bundle.
pub const SERVICE_ACCOUNT_VAR: &str = "FIREBASE_SERVICE_ACCOUNT";

/// Port used when `WEBHOOK_PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("FIREBASE_SERVICE_ACCOUNT is not valid JSON: {0}")]
    MalformedServiceAccount(#[from] serde_json::Error),

    #[error("service account has no project_id")]
    MissingProjectId,

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Service-account credential bundle.
///
/// Only `project_id` is required; the remaining fields are kept so the
/// bundle can be logged safely and inspected.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    private_key: Option<String>,
}

impl ServiceAccount {
    /// Parse and validate the JSON bundle.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let account: ServiceAccount = serde_json::from_str(raw)?;
        if account.project_id.trim().is_empty() {
            return Err(ConfigError::MissingProjectId);
        }
        Ok(account)
    }

    /// Database endpoint derived from the project id.
    pub fn database_url(&self) -> String {
        format!("https://{}.{}", self.project_id, DATABASE_HOST_SUFFIX)
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub service_account: ServiceAccount,
    pub database_url: String,

    // Telegram
    pub bot_token: String,
    pub webapp_url: Url,

    /// Public webhook URL. When set, it is registered with Telegram at startup.
    pub webhook_url: Option<Url>,

    // MongoDB
    pub mongodb_uri: String,
    pub mongodb_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let service_account = ServiceAccount::parse(&required(SERVICE_ACCOUNT_VAR)?)?;
        let database_url = service_account.database_url();

        let bot_token = required("BOT_TOKEN")?;

        let webapp_url = Url::parse(&required("WEBAPP_URL")?)
            .map_err(|source| ConfigError::InvalidUrl { name: "WEBAPP_URL", source })?;

        let webhook_url = lookup("WEBHOOK_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| Url::parse(s.trim()))
            .transpose()
            .map_err(|source| ConfigError::InvalidUrl { name: "WEBHOOK_URL", source })?;

        let mongodb_uri = required("MONGODB_URI")?;
        let mongodb_database = lookup("MONGODB_DATABASE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| service_account.project_id.clone());

        Ok(Self {
            service_account,
            database_url,
            bot_token,
            webapp_url,
            webhook_url,
            mongodb_uri,
            mongodb_database,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("service_account", &self.service_account)
            .field("database_url", &self.database_url)
            .field("bot_token", &"<redacted>")
            .field("webapp_url", &self.webapp_url.as_str())
            .field("webhook_url", &self.webhook_url.as_ref().map(Url::as_str))
            .field("mongodb_database", &self.mongodb_database)
            .finish()
    }
}

/// Port the HTTP server listens on.
///
/// Read separately from [`Config`] so the server can still bind and report
/// configuration errors when the rest of the configuration is unusable.
pub fn listen_port() -> u16 {
    parse_port(env::var("WEBHOOK_PORT").ok())
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid WEBHOOK_PORT {:?}, using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}
