//! Operation groups, one per service resource.
//!
//! Each group borrows the [`BatchServiceClient`](crate::core::client::BatchServiceClient)
//! it was obtained from. Request bodies are checked with
//! [`Validate`](crate::utils::validation::Validate) before anything is sent.
//! Mutating calls return the [`ResponseHeaders`](crate::domain::options::ResponseHeaders);
//! list calls return the first page.

pub mod account;
pub mod applications;
pub mod certificates;
pub mod compute_nodes;
pub mod files;
pub mod job_schedules;
pub mod jobs;
pub mod pools;
pub mod tasks;
