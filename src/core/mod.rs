pub mod client;
pub mod operations;
pub mod paging;

pub use crate::domain::ports::{ConfigProvider, Credentials};
pub use crate::utils::error::Result;
pub use client::BatchServiceClient;
pub use paging::PagedList;
