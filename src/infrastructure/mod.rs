//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use database::{ensure_indexes, init_database, DatabaseConfig, MongoRepositoryProvider};
pub use storage::InMemoryRepositoryProvider;
