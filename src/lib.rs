//! # Job board service
//!
//! User authentication (signup, login, JWT, `/me`) and job posting CRUD
//! backed by MongoDB.
//!
//! ## Architecture
//!
//! - **domain**: entities, input DTOs and repository traits
//! - **application**: use-case services (`UserService`, `JobService`)
//! - **infrastructure**: crypto, MongoDB and in-memory repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, input checks and shutdown signalling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
