use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn job_not_found(id: &str) -> Self {
        DomainError::NotFound {
            entity: "Job",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn user_not_found(id: &str) -> Self {
        DomainError::NotFound {
            entity: "User",
            field: "id",
            value: id.to_string(),
        }
    }
}

impl From<mongodb::error::Error> for DomainError {
    fn from(e: mongodb::error::Error) -> Self {
        DomainError::Internal(format!("Database error: {}", e))
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(e: bcrypt::BcryptError) -> Self {
        DomainError::Internal(format!("Password hashing error: {}", e))
    }
}

impl From<jsonwebtoken::errors::Error> for DomainError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        DomainError::Internal(format!("Token error: {}", e))
    }
}

impl From<tokio::task::JoinError> for DomainError {
    fn from(e: tokio::task::JoinError) -> Self {
        DomainError::Internal(format!("Blocking task failed: {}", e))
    }
}
