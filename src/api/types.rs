// Feeds API wire types.
// Defines structs for the JSON exchanged with the news server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Folder id used for feeds that live at the top level.
pub const ROOT_FOLDER_ID: u64 = 0;

/// A subscribed feed as the server reports it.
///
/// Records created locally while a create request is in flight have no
/// server id yet; everything received over the wire does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feed {
    pub id: Option<u64>,
    pub folder_id: u64,
    pub url: String,
    pub title: String,
    pub unread_count: u64,
    pub favicon_link: Option<String>,
    pub link: Option<String>,
    pub pinned: bool,
    pub ordering: u64,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub added: Option<DateTime<Utc>>,
    pub update_error_count: u64,
    pub last_update_error: Option<String>,
    /// Client-side error from a failed create, never sent by the server.
    pub error: Option<String>,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            id: None,
            folder_id: ROOT_FOLDER_ID,
            url: String::new(),
            title: String::new(),
            unread_count: 0,
            favicon_link: None,
            link: None,
            pinned: false,
            ordering: 0,
            added: None,
            update_error_count: 0,
            last_update_error: None,
            error: None,
        }
    }
}

impl Feed {
    /// Build the local stand-in inserted while a create request is pending.
    pub fn placeholder(url: impl Into<String>, folder_id: u64, title: impl Into<String>) -> Self {
        Self {
            folder_id,
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Body for `POST /feeds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedRequest {
    pub parent_folder_id: u64,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body for `POST /feeds/{id}/rename`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameFeedRequest {
    pub feed_title: String,
}

/// Body for `POST /feeds/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFeedRequest {
    pub parent_folder_id: u64,
}

/// Feed list wrapper returned by `GET /feeds` and `POST /feeds`.
///
/// The server is allowed to answer an empty object, so the list defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedsResponse {
    #[serde(default)]
    pub feeds: Vec<Feed>,
}

/// Error body attached to 4xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}
