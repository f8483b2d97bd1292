//! Story types - the `short-story` document shape
//!
//! A story is a title, a creation timestamp and an ordered list of chapters.
//! Field names on the wire follow the stored documents (`createdAt`,
//! `chapterTitle`, `chapterContent`, `image`).

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, store-assigned story identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One section of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub chapter_title: String,
    /// Body text; paragraphs are separated by a blank line (`\n\n`)
    pub chapter_content: String,
    /// Storage reference (`gs://...`) or a directly fetchable URL
    pub image: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            chapter_title: title.into(),
            chapter_content: content.into(),
            image: image.into(),
        }
    }
}

/// A published story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
    pub chapters: Vec<Chapter>,
}

impl Story {
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: i64, chapters: Vec<Chapter>) -> Self {
        Self {
            id: StoryId::new(id),
            title: title.into(),
            created_at,
            chapters,
        }
    }

    /// Creation time as a UTC datetime
    pub fn created_at_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.created_at)
            .ok_or_else(|| Error::InvalidStory(format!("createdAt out of range: {}", self.created_at)))
    }

    /// Long-form UTC publication date, e.g. `October 16, 2026`
    pub fn publication_date(&self) -> Result<String> {
        Ok(self.created_at_utc()?.format("%B %-d, %Y").to_string())
    }
}

/// The stored document body, without the id and timestamp columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoryBody {
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl From<&Story> for StoryBody {
    fn from(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            chapters: story.chapters.clone(),
        }
    }
}
