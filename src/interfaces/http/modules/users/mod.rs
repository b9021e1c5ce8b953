//! Users module: signup, login and the authenticated profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
