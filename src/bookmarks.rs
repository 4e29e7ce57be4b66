//! User bookmarks: the record shape, display ordering, and the storage seam.
//!
//! Bookmarks are persisted externally, scoped to a `(user email, video id)`
//! pair; this module owns the comparators/filter the UI applies and an
//! in-memory store used by tests and local runs.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::entities::{matches_query, SortOrder};
use crate::timecode::EpochSeconds;
use crate::{Result, VidmarkError};

/// A user-authored annotation at a specific video timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Storage-assigned unique id
    pub id: String,
    pub title: String,
    /// Video offset the bookmark was taken at
    pub timestamp: EpochSeconds,
    /// Free-form note body
    pub content: String,
}

/// Ascending lexicographic order on the bookmark title
pub fn alphabetical(a: &Bookmark, b: &Bookmark) -> Ordering {
    a.title.cmp(&b.title)
}

/// Ascending order on the bookmarked timestamp, ties broken by title
pub fn chronological(a: &Bookmark, b: &Bookmark) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| alphabetical(a, b))
}

/// Sort a bookmark list in place; stable with explicit tie-breaks
pub fn sort_bookmarks(bookmarks: &mut [Bookmark], order: SortOrder) {
    match order {
        SortOrder::Alphabetical => bookmarks.sort_by(alphabetical),
        SortOrder::Chronological => bookmarks.sort_by(chronological),
    }
}

/// Bookmarks whose title contains `query`, case-insensitively, in their
/// existing order; an empty query matches everything
pub fn filter_bookmarks<'a>(bookmarks: &'a [Bookmark], query: &str) -> Vec<&'a Bookmark> {
    bookmarks
        .iter()
        .filter(|bookmark| matches_query(&bookmark.title, query))
        .collect()
}

/// The storage seam for bookmark persistence
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks for the given user and video
    async fn all_bookmarks(&self, email: &str, video_id: &str) -> Result<Vec<Bookmark>>;

    /// Persist a new bookmark and return it with its assigned id
    async fn add_bookmark(
        &self,
        email: &str,
        video_id: &str,
        timestamp: EpochSeconds,
        title: &str,
        content: &str,
    ) -> Result<Bookmark>;

    /// Remove a bookmark by its globally unique id
    async fn remove_bookmark(&self, id: &str) -> Result<()>;
}

/// In-memory [`BookmarkStore`] keyed by `(email, video id)`
#[derive(Debug, Default)]
pub struct InMemoryBookmarkStore {
    bookmarks: RwLock<HashMap<(String, String), Vec<Bookmark>>>,
    next_id: AtomicU64,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn all_bookmarks(&self, email: &str, video_id: &str) -> Result<Vec<Bookmark>> {
        let bookmarks = self.bookmarks.read().await;
        Ok(bookmarks
            .get(&(email.to_string(), video_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn add_bookmark(
        &self,
        email: &str,
        video_id: &str,
        timestamp: EpochSeconds,
        title: &str,
        content: &str,
    ) -> Result<Bookmark> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let bookmark = Bookmark {
            id: format!("bm-{}", id),
            title: title.to_string(),
            timestamp,
            content: content.to_string(),
        };

        debug!("Adding bookmark {} for {}/{}", bookmark.id, email, video_id);

        let mut bookmarks = self.bookmarks.write().await;
        bookmarks
            .entry((email.to_string(), video_id.to_string()))
            .or_default()
            .push(bookmark.clone());
        Ok(bookmark)
    }

    async fn remove_bookmark(&self, id: &str) -> Result<()> {
        let mut bookmarks = self.bookmarks.write().await;
        for list in bookmarks.values_mut() {
            if let Some(position) = list.iter().position(|bookmark| bookmark.id == id) {
                list.remove(position);
                debug!("Removed bookmark {}", id);
                return Ok(());
            }
        }
        Err(VidmarkError::BookmarkNotFound(id.to_string()))
    }
}
