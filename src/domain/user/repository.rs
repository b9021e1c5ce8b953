use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user. An already registered email yields `DomainError::Conflict`.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// `id` must already be ObjectId-shaped; anything else is reported as `None`.
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
}
