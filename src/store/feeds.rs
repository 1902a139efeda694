// In-memory feed cache.
// Tracks feed records keyed by URL and keeps unread aggregates current.

use std::collections::HashMap;

use crate::api::Feed;

/// Prefix a schemeless URL with `http://` and strip surrounding whitespace.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Client-side cache of subscribed feeds.
///
/// Records are keyed by URL; feeds confirmed by the server are also
/// reachable through an id index. The total unread count and the
/// per-folder unread counts are maintained incrementally on every
/// mutation, so reads never walk the whole map.
#[derive(Debug, Default)]
pub struct FeedStore {
    feeds: HashMap<String, Feed>,
    ids: HashMap<u64, String>,
    unread_total: u64,
    folder_unread: HashMap<u64, u64>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache contents with a fresh server snapshot.
    pub fn receive(&mut self, feeds: Vec<Feed>) {
        self.feeds.clear();
        self.ids.clear();
        self.unread_total = 0;
        self.folder_unread.clear();
        for feed in feeds {
            self.add(feed);
        }
    }

    /// Insert a feed, merging by URL: an existing record is replaced, but
    /// an incoming record without a server id inherits the replaced
    /// record's id, so a re-create never orphans a confirmed id.
    pub fn add(&mut self, mut feed: Feed) {
        if let Some(old) = self.feeds.remove(&feed.url) {
            self.unread_total -= old.unread_count;
            if let Some(count) = self.folder_unread.get_mut(&old.folder_id) {
                *count = count.saturating_sub(old.unread_count);
            }
            if let Some(id) = old.id {
                self.ids.remove(&id);
            }
            if feed.id.is_none() {
                feed.id = old.id;
            }
        }

        self.unread_total += feed.unread_count;
        *self.folder_unread.entry(feed.folder_id).or_insert(0) += feed.unread_count;
        if let Some(id) = feed.id {
            self.ids.insert(id, feed.url.clone());
        }
        self.feeds.insert(feed.url.clone(), feed);
    }

    /// Remove a feed by URL, returning the detached record.
    pub fn remove(&mut self, url: &str) -> Option<Feed> {
        let feed = self.feeds.remove(url)?;
        self.unread_total -= feed.unread_count;
        if let Some(count) = self.folder_unread.get_mut(&feed.folder_id) {
            *count = count.saturating_sub(feed.unread_count);
        }
        if let Some(id) = feed.id {
            self.ids.remove(&id);
        }
        Some(feed)
    }

    pub fn get(&self, url: &str) -> Option<&Feed> {
        self.feeds.get(url)
    }

    pub fn get_by_id(&self, id: u64) -> Option<&Feed> {
        self.feeds.get(self.ids.get(&id)?)
    }

    /// All feeds assigned to a folder.
    pub fn get_by_folder(&self, folder_id: u64) -> Vec<&Feed> {
        self.feeds
            .values()
            .filter(|feed| feed.folder_id == folder_id)
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = &Feed> {
        self.feeds.values()
    }

    pub fn size(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Cached total unread count across all feeds.
    pub fn unread_count(&self) -> u64 {
        self.unread_total
    }

    /// Cached unread count for one folder.
    ///
    /// `None` when no aggregate entry exists, which is also the state a
    /// global [`mark_read`](Self::mark_read) leaves every folder in.
    pub fn folder_unread_count(&self, folder_id: u64) -> Option<u64> {
        self.folder_unread.get(&folder_id).copied()
    }

    /// Mark every feed as read.
    pub fn mark_read(&mut self) {
        for feed in self.feeds.values_mut() {
            feed.unread_count = 0;
        }
        self.unread_total = 0;
        self.folder_unread.clear();
    }

    /// Mark one feed as read.
    pub fn mark_feed_read(&mut self, id: u64) {
        let Some(url) = self.ids.get(&id) else {
            return;
        };
        let Some(feed) = self.feeds.get_mut(url) else {
            return;
        };
        let delta = feed.unread_count;
        feed.unread_count = 0;
        self.unread_total -= delta;
        if let Some(count) = self.folder_unread.get_mut(&feed.folder_id) {
            *count = count.saturating_sub(delta);
        }
    }

    /// Mark a single item of a feed as read, flooring the count at zero.
    ///
    /// A floored decrement must leave the aggregates untouched, otherwise
    /// the total would drift below the sum of the feed counts.
    pub fn mark_item_of_feed_read(&mut self, id: u64) {
        let Some(url) = self.ids.get(&id) else {
            return;
        };
        let Some(feed) = self.feeds.get_mut(url) else {
            return;
        };
        if feed.unread_count == 0 {
            return;
        }
        feed.unread_count -= 1;
        self.unread_total -= 1;
        if let Some(count) = self.folder_unread.get_mut(&feed.folder_id) {
            *count = count.saturating_sub(1);
        }
    }

    /// Mark a single item of a feed as unread.
    pub fn mark_item_of_feed_unread(&mut self, id: u64) {
        let Some(url) = self.ids.get(&id) else {
            return;
        };
        let Some(feed) = self.feeds.get_mut(url) else {
            return;
        };
        feed.unread_count += 1;
        self.unread_total += 1;
        *self.folder_unread.entry(feed.folder_id).or_insert(0) += 1;
    }

    /// Mark one item of each listed feed as read.
    pub fn mark_items_of_feeds_read(&mut self, ids: &[u64]) {
        for &id in ids {
            self.mark_item_of_feed_read(id);
        }
    }

    /// Mark every feed in a folder as read.
    ///
    /// Unlike [`mark_read`](Self::mark_read) this leaves a zero aggregate
    /// entry behind for the folder.
    pub fn mark_folder_read(&mut self, folder_id: u64) {
        let mut delta = 0;
        for feed in self.feeds.values_mut() {
            if feed.folder_id == folder_id {
                delta += feed.unread_count;
                feed.unread_count = 0;
            }
        }
        self.unread_total -= delta;
        self.folder_unread.insert(folder_id, 0);
    }

    /// Set a feed's title. Returns false when the id is unknown.
    pub fn set_title(&mut self, id: u64, title: &str) -> bool {
        let Some(url) = self.ids.get(&id) else {
            return false;
        };
        let Some(feed) = self.feeds.get_mut(url) else {
            return false;
        };
        feed.title = title.to_string();
        true
    }

    /// Move a feed to another folder, transferring its unread count
    /// between the folder aggregates. Returns false when the id is unknown.
    pub fn move_to_folder(&mut self, id: u64, folder_id: u64) -> bool {
        let Some(url) = self.ids.get(&id) else {
            return false;
        };
        let Some(feed) = self.feeds.get_mut(url) else {
            return false;
        };
        if feed.folder_id == folder_id {
            return true;
        }
        let old_folder = feed.folder_id;
        feed.folder_id = folder_id;
        let delta = feed.unread_count;
        if let Some(count) = self.folder_unread.get_mut(&old_folder) {
            *count = count.saturating_sub(delta);
        }
        *self.folder_unread.entry(folder_id).or_insert(0) += delta;
        true
    }

    /// Record a create failure on the local record and drop its favicon.
    pub fn record_create_error(&mut self, url: &str, message: &str) -> bool {
        let Some(feed) = self.feeds.get_mut(url) else {
            return false;
        };
        feed.error = Some(message.to_string());
        feed.favicon_link = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(id: u64, folder_id: u64, url: &str, title: Option<&str>, unread: u64) -> Feed {
        Feed {
            id: Some(id),
            folder_id,
            url: url.to_string(),
            title: title.unwrap_or(url).to_string(),
            unread_count: unread,
            ..Feed::default()
        }
    }

    fn fixture() -> FeedStore {
        let mut store = FeedStore::new();
        store.receive(vec![
            feed(1, 3, "ye", None, 45),
            feed(2, 4, "sye", None, 25),
            feed(3, 3, "1sye", Some("hore"), 0),
        ]);
        store
    }

    #[test]
    fn test_mark_all_read() {
        let mut store = fixture();

        store.mark_read();

        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.get("ye").unwrap().unread_count, 0);
    }

    #[test]
    fn test_mark_feed_read() {
        let mut store = fixture();

        store.mark_feed_read(1);

        assert_eq!(store.get("ye").unwrap().unread_count, 0);
        assert_eq!(store.unread_count(), 25);
    }

    #[test]
    fn test_mark_item_read() {
        let mut store = fixture();

        store.mark_item_of_feed_read(1);

        assert_eq!(store.get("ye").unwrap().unread_count, 44);
    }

    #[test]
    fn test_mark_item_unread() {
        let mut store = fixture();

        store.mark_item_of_feed_unread(1);

        assert_eq!(store.get("ye").unwrap().unread_count, 46);
    }

    #[test]
    fn test_item_read_floors_at_zero() {
        let mut store = fixture();

        // Feed 3 starts at zero; a floored decrement must not disturb
        // the cached aggregates.
        store.mark_item_of_feed_read(3);

        assert_eq!(store.get("1sye").unwrap().unread_count, 0);
        assert_eq!(store.unread_count(), 70);
        assert_eq!(store.folder_unread_count(3), Some(45));
    }

    #[test]
    fn test_get_by_folder() {
        let store = fixture();

        assert_eq!(store.get_by_folder(3).len(), 2);
    }

    #[test]
    fn test_caches_unread_count() {
        let mut store = fixture();
        assert_eq!(store.unread_count(), 70);

        store.mark_item_of_feed_read(1);
        assert_eq!(store.unread_count(), 69);

        store.mark_item_of_feed_unread(1);
        assert_eq!(store.unread_count(), 70);

        store.mark_folder_read(3);
        assert_eq!(store.unread_count(), 25);

        store.mark_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_caches_folder_unread_count() {
        let mut store = fixture();
        assert_eq!(store.folder_unread_count(3), Some(45));

        store.mark_item_of_feed_read(1);
        assert_eq!(store.folder_unread_count(3), Some(44));

        store.mark_item_of_feed_unread(1);
        assert_eq!(store.folder_unread_count(3), Some(45));

        store.mark_folder_read(3);
        assert_eq!(store.folder_unread_count(3), Some(0));

        // A global mark-read drops the folder aggregates entirely.
        store.mark_read();
        assert_eq!(store.folder_unread_count(4), None);
    }

    #[test]
    fn test_batch_mark_items_read() {
        let mut store = fixture();

        store.mark_items_of_feeds_read(&[1, 2]);

        assert_eq!(store.unread_count(), 68);
    }

    #[test]
    fn test_remove_updates_aggregates() {
        let mut store = fixture();

        let removed = store.remove("ye").unwrap();

        assert_eq!(removed.id, Some(1));
        assert_eq!(store.size(), 2);
        assert_eq!(store.unread_count(), 25);
        assert_eq!(store.folder_unread_count(3), Some(0));
        assert!(store.get_by_id(1).is_none());
    }

    #[test]
    fn test_move_transfers_folder_counts() {
        let mut store = fixture();

        assert!(store.move_to_folder(2, 5));

        assert_eq!(store.get("sye").unwrap().folder_id, 5);
        assert_eq!(store.folder_unread_count(5), Some(25));
        assert_eq!(store.folder_unread_count(4), Some(0));
        assert_eq!(store.unread_count(), 70);
    }

    #[test]
    fn test_add_replaces_by_url() {
        let mut store = fixture();

        store.add(feed(7, 3, "ye", Some("fresh"), 10));

        assert_eq!(store.size(), 3);
        assert_eq!(store.unread_count(), 35);
        assert_eq!(store.folder_unread_count(3), Some(10));
        assert!(store.get_by_id(1).is_none());
        assert_eq!(store.get_by_id(7).unwrap().title, "fresh");
    }

    #[test]
    fn test_add_without_id_keeps_confirmed_id() {
        let mut store = fixture();

        store.add(Feed::placeholder("ye", 3, "ye"));

        let merged = store.get("ye").unwrap();
        assert_eq!(merged.id, Some(1));
        assert_eq!(merged.unread_count, 0);
        assert_eq!(store.get_by_id(1).unwrap().url, "ye");
        assert_eq!(store.unread_count(), 25);
    }

    #[test]
    fn test_totals_match_feed_sums() {
        let mut store = fixture();

        store.mark_item_of_feed_unread(2);
        store.mark_items_of_feeds_read(&[1, 1, 3]);
        store.mark_folder_read(4);

        let sum: u64 = store.all().map(|feed| feed.unread_count).sum();
        assert_eq!(store.unread_count(), sum);

        for folder in [3, 4] {
            let folder_sum: u64 = store
                .get_by_folder(folder)
                .iter()
                .map(|feed| feed.unread_count)
                .sum();
            assert_eq!(store.folder_unread_count(folder), Some(folder_sum));
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url(" hey "), "http://hey");
        assert_eq!(normalize_url("http://hey"), "http://hey");
        assert_eq!(normalize_url("https://hey"), "https://hey");
    }
}
