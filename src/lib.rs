// lede: client-side cache and sync layer for a Nextcloud News style feeds API.
// Mutations apply optimistically to the in-memory store and reconcile with
// the server; unread aggregates stay consistent throughout.

pub mod api;
pub mod cache;
pub mod error;
pub mod service;
pub mod store;

pub use api::{ApiClient, Feed, FeedApi};
pub use error::{LedeError, Result};
pub use service::FeedService;
pub use store::FeedStore;
