//! Client-side counterpart of the API: HTTP access plus the in-memory view
//! caches the original single-page app kept.

pub mod api;
pub mod feed;

pub use api::{ApiClient, ClientError};
pub use feed::FeedCache;
