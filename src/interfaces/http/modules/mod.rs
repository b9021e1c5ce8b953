pub mod health;
pub mod jobs;
pub mod metrics;
pub mod request_id;
pub mod users;
