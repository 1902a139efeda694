// Feeds API endpoint functions.
// Defines the abstract remote contract and its HTTP implementation.

use async_trait::async_trait;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{CreateFeedRequest, FeedsResponse, MoveFeedRequest, RenameFeedRequest};

/// Remote contract for feed mutations.
///
/// The cache layer only depends on this trait, so tests can drive it with
/// an in-memory fake instead of a live server.
#[async_trait]
pub trait FeedApi {
    /// Fetch all subscribed feeds.
    async fn list_feeds(&self) -> Result<FeedsResponse>;

    /// Subscribe to a new feed.
    async fn create_feed(&self, request: &CreateFeedRequest) -> Result<FeedsResponse>;

    /// Unsubscribe from a feed.
    async fn delete_feed(&self, id: u64) -> Result<()>;

    /// Rename a feed.
    async fn rename_feed(&self, id: u64, request: &RenameFeedRequest) -> Result<()>;

    /// Move a feed to another folder.
    async fn move_feed(&self, id: u64, request: &MoveFeedRequest) -> Result<()>;

    /// Restore a previously deleted feed.
    async fn restore_feed(&self, id: u64) -> Result<()>;
}

#[async_trait]
impl FeedApi for ApiClient {
    async fn list_feeds(&self) -> Result<FeedsResponse> {
        let response = self.get("/feeds").await?;
        let feeds: FeedsResponse = response.json().await?;
        Ok(feeds)
    }

    async fn create_feed(&self, request: &CreateFeedRequest) -> Result<FeedsResponse> {
        let response = self.post_json("/feeds", request).await?;
        let feeds: FeedsResponse = response.json().await?;
        Ok(feeds)
    }

    async fn delete_feed(&self, id: u64) -> Result<()> {
        self.delete(&format!("/feeds/{}", id)).await?;
        Ok(())
    }

    async fn rename_feed(&self, id: u64, request: &RenameFeedRequest) -> Result<()> {
        self.post_json(&format!("/feeds/{}/rename", id), request)
            .await?;
        Ok(())
    }

    async fn move_feed(&self, id: u64, request: &MoveFeedRequest) -> Result<()> {
        self.post_json(&format!("/feeds/{}/move", id), request)
            .await?;
        Ok(())
    }

    async fn restore_feed(&self, id: u64) -> Result<()> {
        self.post_empty(&format!("/feeds/{}/restore", id)).await?;
        Ok(())
    }
}
