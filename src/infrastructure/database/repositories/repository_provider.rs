//! MongoDB implementation of RepositoryProvider

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Database;

use super::job_repository::MongoJobRepository;
use super::user_repository::MongoUserRepository;
use crate::domain::{DomainResult, JobRepository, RepositoryProvider, UserRepository};

/// Unified repository provider backed by one MongoDB database handle.
///
/// The driver pools connections internally; cloning `Database` is cheap.
pub struct MongoRepositoryProvider {
    db: Database,
    users: MongoUserRepository,
    jobs: MongoJobRepository,
}

impl MongoRepositoryProvider {
    pub fn new(db: Database) -> Self {
        Self {
            users: MongoUserRepository::new(&db),
            jobs: MongoJobRepository::new(&db),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for MongoRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn jobs(&self) -> &dyn JobRepository {
        &self.jobs
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
