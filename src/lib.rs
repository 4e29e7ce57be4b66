//! Vidmark - caption-driven video annotation engine
//!
//! Parses SBV caption transcripts into timestamped caption records, converts
//! between human timestamps and epoch seconds, and sorts/filters the keyword
//! and bookmark collections the annotation UI renders.

pub mod bookmarks;
pub mod captions;
pub mod config;
pub mod entities;
pub mod nlp;
pub mod timecode;
pub mod youtube;

// Re-export main types for easy access
pub use crate::bookmarks::{Bookmark, BookmarkStore, InMemoryBookmarkStore};
pub use crate::captions::{parse_captions, Caption, CaptionDocument};
pub use crate::config::Config;
pub use crate::entities::{Entity, EntityIndex, SortOrder};
pub use crate::nlp::{merge_into_windows, CaptionWindow, NlpClient};
pub use crate::timecode::{format_epoch, parse_timestamp, EpochSeconds};

/// Result type for vidmark operations
pub type Result<T> = std::result::Result<T, VidmarkError>;

/// Error types for vidmark operations
#[derive(thiserror::Error, Debug)]
pub enum VidmarkError {
    #[error("malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("not a YouTube video url: {0}")]
    InvalidVideoUrl(String),

    #[error("keyword service error: {0}")]
    KeywordService(String),

    #[error("bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
