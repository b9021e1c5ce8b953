//! Domain layer: entities, input DTOs and repository interfaces.

pub mod job;
pub mod repositories;
pub mod user;

pub use job::{Company, CreateJobDto, Job, JobRepository, UpdateJobDto};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{CreateUserDto, User, UserRepository};

pub use crate::shared::errors::DomainError;
