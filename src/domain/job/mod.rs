//! Job posting aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use dto_create::CreateJobDto;
pub use dto_update::UpdateJobDto;
pub use model::{Company, Job};
pub use repository::JobRepository;
