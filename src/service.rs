// Feed service.
// Applies mutations to the local cache first and reconciles them with the
// remote feeds API.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::{
    CreateFeedRequest, Feed, FeedApi, MoveFeedRequest, ROOT_FOLDER_ID, RenameFeedRequest,
};
use crate::cache;
use crate::error::{LedeError, Result};
use crate::store::{FeedStore, normalize_url};

/// Cache-backed front end for the feeds API.
///
/// Every mutation updates the local [`FeedStore`] before the network call
/// goes out, so readers observe the change immediately. One call is in
/// flight per operation; per entity the last write wins.
pub struct FeedService<A: FeedApi> {
    api: A,
    store: FeedStore,
    deleted: Option<Feed>,
}

impl<A: FeedApi> FeedService<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            store: FeedStore::new(),
            deleted: None,
        }
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FeedStore {
        &mut self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the cache with the server's feed list.
    pub async fn refresh(&mut self) -> Result<()> {
        let response = self.api.list_feeds().await?;
        debug!(count = response.feeds.len(), "received feed list");
        self.store.receive(response.feeds);
        Ok(())
    }

    /// Subscribe to a feed.
    ///
    /// The URL is trimmed and prefixed with `http://` when it carries no
    /// scheme. A placeholder record is visible in the cache while the
    /// request is in flight; on success any record the server returns
    /// replaces it, and on rejection the server's message is recorded on
    /// the placeholder instead.
    pub async fn create(
        &mut self,
        url: &str,
        folder_id: Option<u64>,
        title: Option<&str>,
    ) -> Result<()> {
        let url = normalize_url(url);
        let folder_id = folder_id.unwrap_or(ROOT_FOLDER_ID);
        let title = title
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_string);
        let local_title = title.clone().unwrap_or_else(|| url.clone());

        self.store
            .add(Feed::placeholder(url.clone(), folder_id, local_title));

        let request = CreateFeedRequest {
            parent_folder_id: folder_id,
            url: url.clone(),
            title,
        };

        match self.api.create_feed(&request).await {
            Ok(response) => {
                if let Some(feed) = response.feeds.into_iter().next() {
                    debug!(url = %feed.url, id = ?feed.id, "feed confirmed by server");
                    self.store.remove(&url);
                    self.store.add(feed);
                }
                Ok(())
            }
            Err(LedeError::Rejected { message }) => {
                warn!(url = %url, %message, "feed creation rejected");
                self.store.record_create_error(&url, &message);
                Err(LedeError::Rejected { message })
            }
            Err(err) => Err(err),
        }
    }

    /// Unsubscribe from a feed, keeping the record for a possible undo.
    ///
    /// A placeholder that never got a server id cannot be deleted remotely
    /// and is reported as unknown before any request goes out.
    pub async fn delete(&mut self, url: &str) -> Result<()> {
        let id = match self.store.get(url) {
            Some(feed) => feed
                .id
                .ok_or_else(|| LedeError::UnknownFeed(url.to_string()))?,
            None => return Err(LedeError::UnknownFeed(url.to_string())),
        };

        self.deleted = self.store.remove(url);
        debug!(%url, id, "feed removed from cache");
        self.api.delete_feed(id).await
    }

    /// Undo the most recent delete, restoring the original record.
    ///
    /// Silently does nothing when there is nothing to restore.
    pub async fn undo_delete(&mut self) -> Result<()> {
        let Some(feed) = self.deleted.take() else {
            return Ok(());
        };

        let id = feed.id;
        debug!(url = %feed.url, ?id, "restoring deleted feed");
        self.store.add(feed);
        if let Some(id) = id {
            self.api.restore_feed(id).await?;
        }
        Ok(())
    }

    /// Rename a feed.
    pub async fn rename(&mut self, id: u64, title: &str) -> Result<()> {
        if !self.store.set_title(id, title) {
            return Err(LedeError::UnknownFeed(id.to_string()));
        }

        let request = RenameFeedRequest {
            feed_title: title.to_string(),
        };
        self.api.rename_feed(id, &request).await
    }

    /// Move a feed to another folder.
    pub async fn move_feed(&mut self, id: u64, folder_id: u64) -> Result<()> {
        if !self.store.move_to_folder(id, folder_id) {
            return Err(LedeError::UnknownFeed(id.to_string()));
        }

        let request = MoveFeedRequest {
            parent_folder_id: folder_id,
        };
        self.api.move_feed(id, &request).await
    }

    /// Write the current feed list to a snapshot file.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let mut feeds: Vec<Feed> = self.store.all().cloned().collect();
        // Stable order keeps snapshot diffs readable.
        feeds.sort_by(|a, b| a.url.cmp(&b.url));
        cache::write_cached(path, &feeds)
    }

    /// Load the cache from a snapshot file if one is present and fresh.
    ///
    /// Returns whether a snapshot was loaded.
    pub fn load_snapshot(&mut self, path: &Path, ttl: Duration) -> Result<bool> {
        match cache::read_if_valid::<Vec<Feed>>(path, ttl)? {
            Some(feeds) => {
                debug!(count = feeds.len(), "loaded feed snapshot");
                self.store.receive(feeds);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
