//! Database repository implementations
//!
//! Per-aggregate MongoDB repositories + unified RepositoryProvider.

pub mod job_repository;
pub mod repository_provider;
pub mod user_repository;

pub use job_repository::MongoJobRepository;
pub use repository_provider::MongoRepositoryProvider;
pub use user_repository::MongoUserRepository;
