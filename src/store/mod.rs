// Feed store module.
// In-memory cache of subscribed feeds with unread-count bookkeeping.

pub mod feeds;

pub use feeds::{FeedStore, normalize_url};
