// Error types for the lede feed client.
// Covers API transport errors, server rejections, and local cache errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedeError {
    #[error("feeds API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("authentication failed: invalid or expired credentials")]
    Unauthorized,

    #[error("resource not found: {0}")]
    NotFound(String),

    /// Server refused the request and sent back a message body.
    #[error("{message}")]
    Rejected { message: String },

    /// The feed is not present in the local cache (or has no server id yet).
    #[error("unknown feed: {0}")]
    UnknownFeed(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LedeError>;
