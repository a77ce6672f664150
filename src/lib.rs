//! Typed client for a cloud batch-computing REST API: pools, jobs, tasks,
//! job schedules, compute nodes, certificates and node files.
//!
//! ```no_run
//! use batch_rest_client::adapters::credentials::BearerTokenCredentials;
//! use batch_rest_client::domain::options::ListOptions;
//! use batch_rest_client::BatchServiceClient;
//! use std::sync::Arc;
//!
//! # async fn demo() -> batch_rest_client::Result<()> {
//! let client = BatchServiceClient::new(
//!     "https://myaccount.westus.batch.azure.com",
//!     Arc::new(BearerTokenCredentials::new("token")),
//! )?;
//! let first = client
//!     .pools()
//!     .list(&ListOptions::new().with_filter("state eq 'active'"))
//!     .await?;
//! let pools = client.list_all(first, &Default::default()).await?;
//! println!("{} active pools", pools.len());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::AccountConfig;
pub use core::{BatchServiceClient, PagedList};
pub use domain::options;
pub use utils::error::{BatchClientError, Result};
