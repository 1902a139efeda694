// Snapshot cache module.
// Persists the last-known feed list for offline startup.

pub mod paths;
pub mod store;

pub use paths::{cache_dir, feeds_path};
pub use store::{CachedData, DEFAULT_TTL, read_cached, read_if_valid, write_cached};
