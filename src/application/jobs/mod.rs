//! Job postings module

pub mod service;

pub use service::{JobDraft, JobService};
