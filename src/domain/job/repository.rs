//! Job repository interface

use async_trait::async_trait;

use super::{CreateJobDto, Job, UpdateJobDto};
use crate::domain::DomainResult;

/// Ids passed in are expected to be ObjectId-shaped; malformed ids are
/// rejected before reaching the repository.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<Job>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Job>>;
    async fn create(&self, dto: CreateJobDto) -> DomainResult<Job>;
    /// Returns the updated job, or `None` when no job has this id.
    async fn update(&self, id: &str, dto: UpdateJobDto) -> DomainResult<Option<Job>>;
    /// Returns whether a job was deleted.
    async fn delete(&self, id: &str) -> DomainResult<bool>;
}
