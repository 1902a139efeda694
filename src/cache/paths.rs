// Snapshot path utilities.
// Locates the on-disk feed snapshot under the platform cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/lede on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lede").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the cached feed list snapshot.
pub fn feeds_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("feeds.json"))
}
