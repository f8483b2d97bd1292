//! Story loading and page header

use crate::Result;
use crate::page::{Page, StoryRequest};
use crate::storage::{DocumentStore, Query};
use crate::story::Story;

/// Fetch the requested story, or the newest one when no id was given.
///
/// `Ok(None)` means the lookup matched nothing.
pub async fn load_story(
    store: &dyn DocumentStore,
    collection: &str,
    request: &StoryRequest,
) -> Result<Option<Story>> {
    let query = match &request.story {
        Some(id) => Query::by_id(collection, id.clone()),
        None => Query::latest(collection),
    };

    let story = store.run(&query).await?.into_iter().next();
    if let Some(story) = &story {
        tracing::debug!("Loaded story {} ({} chapters)", story.id, story.chapters.len());
    }
    Ok(story)
}

/// Fill the title, publication date and document title.
///
/// Fields are set in order; on error the page keeps what was already set.
pub fn apply_story(page: &mut Page, story: &Story, site_title: &str) -> Result<()> {
    page.publication_date = story.publication_date()?;
    page.story_id = Some(story.id.clone());
    page.title = story.title.clone();
    page.document_title = format!("{} — {}", story.title, site_title);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use crate::storage::query::DEFAULT_COLLECTION;

    #[tokio::test]
    async fn test_load_by_id_and_latest() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_story(DEFAULT_COLLECTION, &Story::new("old", "Old", 100, vec![])).unwrap();
        store.insert_story(DEFAULT_COLLECTION, &Story::new("new", "New", 200, vec![])).unwrap();

        let old = load_story(&store, DEFAULT_COLLECTION, &StoryRequest::for_story("old")).await.unwrap();
        assert_eq!(old.unwrap().title, "Old");

        let latest = load_story(&store, DEFAULT_COLLECTION, &StoryRequest::latest()).await.unwrap();
        assert_eq!(latest.unwrap().title, "New");

        let missing = load_story(&store, DEFAULT_COLLECTION, &StoryRequest::for_story("gone")).await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_bad_timestamp_leaves_partial_header() {
        let mut page = Page::shell("Site");
        let story = Story::new("s", "Broken", i64::MIN, vec![]);

        assert!(apply_story(&mut page, &story, "Site").is_err());
        assert_eq!(page.title, "");
        assert!(page.story_id.is_none());
        assert_eq!(page.document_title, "Site");
    }
}
