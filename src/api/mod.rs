// Feeds API module.
// Provides the client and wire types for talking to the news server.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use endpoints::FeedApi;
pub use types::*;
