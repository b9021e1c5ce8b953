pub mod entities;
pub mod repositories;

pub use repositories::MongoRepositoryProvider;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use entities::UserEntity;

/// MongoDB connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string, e.g. "mongodb://localhost:27017"
    pub uri: String,
    /// Database name
    pub name: String,
    /// Upper bound on pooled connections; driver default when `None`
    pub max_pool_size: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "jobboard".to_string(),
            max_pool_size: None,
        }
    }
}

/// Connect to MongoDB and verify the server answers.
///
/// The driver connects lazily, so a `ping` is issued to fail fast on a bad URI.
pub async fn init_database(config: &DatabaseConfig) -> Result<(Client, Database), mongodb::error::Error> {
    info!("Connecting to MongoDB database '{}'", config.name);

    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some("jobboard".to_string());
    if let Some(max) = config.max_pool_size {
        options.max_pool_size = Some(max);
    }

    let client = Client::with_options(options)?;
    let db = client.database(&config.name);
    db.run_command(doc! { "ping": 1 }).await?;

    info!("MongoDB connected: {}", config.name);
    Ok((client, db))
}

/// Create the indexes the application relies on. Idempotent.
pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    let email_unique = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build(),
        )
        .build();

    db.collection::<UserEntity>(entities::user::COLLECTION)
        .create_index(email_unique)
        .await?;

    info!("MongoDB indexes ensured");
    Ok(())
}
