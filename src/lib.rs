//! # Storyview - Short story viewer
//!
//! Renders a single story from a document store and links it to its
//! chronological neighbours.
//!
//! Storyview provides:
//! - A story/chapter data model matching the `short-story` document shape
//! - A query-driven document store with a SQLite backend
//! - Page assembly: story loading, chapter sections, previous/next navigation
//! - Storage reference resolution for chapter images
//! - An HTTP service serving the rendered page and its JSON model

pub mod story;
pub mod storage;
pub mod images;
pub mod page;
pub mod import;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use story::{Chapter, Story, StoryId};
pub use storage::{DocumentStore, Query, SqliteStore};
pub use page::{Page, PageBuilder, StoryRequest};
pub use config::StoryviewConfig;

/// Result type alias for Storyview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Storyview operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image reference: {0}")]
    InvalidReference(String),

    #[error("Invalid story: {0}")]
    InvalidStory(String),

    #[error("Story not found: {0}")]
    StoryNotFound(String),
}
