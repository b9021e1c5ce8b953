//! HTTP REST API interfaces
//!
//! - `common`: error type and validated JSON extractor
//! - `middleware`: bearer-token authentication
//! - `modules`: handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiServices};
