//! MongoDB database wrapper.

use mongodb::{options::ClientOptions, Client, Collection};
use tracing::{info, warn};

/// Database wrapper for MongoDB operations.
///
/// Created once at startup and shared by every request. The driver pools
/// connections internally, so the handle is never closed per request.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `db_name` - Database name to use
    ///
    /// # Errors
    /// Returns error if the connection string cannot be parsed or the client
    /// cannot be built. An unreachable server is only logged: the driver
    /// connects lazily and the first request reports the failure.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("scorebot".to_string());
        let client = Client::with_options(options)?;

        // Ping the database to verify connection
        match client
            .database("admin")
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
        {
            Ok(_) => info!("Successfully connected to MongoDB"),
            Err(e) => warn!("MongoDB ping failed, continuing with lazy connection: {}", e),
        }

        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// Get a typed collection from the database.
    ///
    /// # Arguments
    /// * `name` - Collection name
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
