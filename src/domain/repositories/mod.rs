//! Repository access for the domain layer
//!
//! `RepositoryProvider` hands out the per-aggregate repositories so
//! services depend on one object regardless of the backing store.

use async_trait::async_trait;

use super::job::JobRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_email("a@b.io").await?;
///     let jobs = repos.jobs().list().await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn jobs(&self) -> &dyn JobRepository;

    /// Round-trip to the backing store; used by the health endpoint.
    async fn ping(&self) -> DomainResult<()>;
}
