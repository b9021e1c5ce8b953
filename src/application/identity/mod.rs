//! Identity module: signup, login and bearer-token authentication
//!
//! Contains the `UserService`; HTTP handlers and the auth middleware are thin
//! wrappers around it.

pub mod service;

pub use service::{AuthResult, SignupInput, UserService};
