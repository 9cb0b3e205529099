pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod routes;
pub mod service;

/// Generator for server-side record ids.
pub type Snowcloud = snowcloud::MultiThread<43, 8, 12>;

pub(crate) const EPOCH: u64 = 1704067200000;
pub(crate) const PRIMARY_ID: i64 = 1;
