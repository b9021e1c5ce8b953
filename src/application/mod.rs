//! Application layer: use-case services over the domain repositories

pub mod identity;
pub mod jobs;

pub use identity::{AuthResult, SignupInput, UserService};
pub use jobs::{JobDraft, JobService};
