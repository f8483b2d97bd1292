//! Offline story import
//!
//! Loads generated stories from a JSON file into the store. Stories that
//! arrive without an id get a slug derived from their title; stories without
//! a timestamp are stamped with the current time.

use std::path::Path;
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use crate::story::{Chapter, Story};

/// A story as found in an import file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedStory {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl ImportedStory {
    pub fn into_story(self) -> Result<Story> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidStory("story has an empty title".to_string()));
        }
        let id = match self.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => story_slug(&self.title, rand::thread_rng().gen_range(0..i32::MAX as u32)),
        };
        let created_at = self.created_at.unwrap_or_else(|| Utc::now().timestamp_millis());
        Ok(Story::new(id, self.title, created_at, self.chapters))
    }
}

/// Document id for a story: `<title>-<suffix>` folded to a lowercase ASCII-ish slug.
///
/// Accents are stripped, punctuation becomes a separator and whitespace runs
/// collapse to a single `-`.
pub fn story_slug(title: &str, suffix: u32) -> String {
    let folded: String = format!("{}-{}", title, suffix)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Parse an import file holding a JSON array of stories
pub fn read_import_file(path: &Path) -> Result<Vec<Story>> {
    let contents = std::fs::read_to_string(path)?;
    let imported: Vec<ImportedStory> = serde_json::from_str(&contents)?;
    imported.into_iter().map(ImportedStory::into_story).collect()
}

/// Insert every story from `path` into `collection`, returning what was stored
pub fn import_file(store: &SqliteStore, collection: &str, path: &Path) -> Result<Vec<Story>> {
    let stories = read_import_file(path)?;
    for story in &stories {
        store.insert_story(collection, story)?;
        tracing::debug!("Imported '{}' as {}", story.title, story.id);
    }
    Ok(stories)
}
