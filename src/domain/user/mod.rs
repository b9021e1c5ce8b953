//! User aggregate
//!
//! Contains the User entity, the creation DTO and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateUserDto;
pub use model::User;
pub use repository::UserRepository;
