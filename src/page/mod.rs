//! Page assembly
//!
//! A request for a story goes through three steps:
//! 1. [`loader`] resolves the requested story (or the newest one) and fills
//!    the page header
//! 2. [`chapters`] builds one collapsible section per chapter, resolving
//!    images concurrently
//! 3. [`adjacent`] looks up the previous and next stories by creation time
//!
//! Steps 2 and 3 run concurrently once the story is known. Failures in any
//! step are logged and leave their part of the page empty.

pub mod adjacent;
pub mod chapters;
pub mod html;
pub mod loader;
pub mod request;

pub use request::StoryRequest;

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::images::ImageResolver;
use crate::storage::DocumentStore;
use crate::storage::query::DEFAULT_COLLECTION;
use crate::story::StoryId;

/// How chapter body text is turned into markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyFormat {
    /// The whole body as a single escaped text node
    Literal,
    /// Blank lines (`\n\n`) become `<br><br>`
    #[default]
    ParagraphBreaks,
}

impl BodyFormat {
    pub fn render(&self, content: &str) -> String {
        let escaped = html::escape(content);
        match self {
            BodyFormat::Literal => escaped,
            BodyFormat::ParagraphBreaks => escaped.replace("\n\n", "<br><br>"),
        }
    }
}

/// What to answer when the story lookup comes back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingStoryPolicy {
    /// Send the reader to the site root
    #[default]
    RedirectHome,
    /// Serve the unpopulated page
    Blank,
}

/// Rendering knobs shared by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub collection: String,
    pub site_title: String,
    pub body_format: BodyFormat,
    pub missing_story: MissingStoryPolicy,
    /// Decorate navigation text with `←` / `→`
    pub nav_glyphs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            site_title: "Short Stories".to_string(),
            body_format: BodyFormat::default(),
            missing_story: MissingStoryPolicy::default(),
            nav_glyphs: true,
        }
    }
}

/// One collapsible chapter section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSection {
    pub title: String,
    /// Escaped markup produced by [`BodyFormat::render`]
    pub body_html: String,
    pub open: bool,
    pub image_url: Option<String>,
}

/// A previous/next navigation affordance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavLink {
    pub visible: bool,
    pub text: String,
    pub href: Option<String>,
    pub story_id: Option<StoryId>,
}

impl NavLink {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn to_story(id: StoryId, text: String) -> Self {
        Self {
            visible: true,
            text,
            href: Some(story_href(&id)),
            story_id: Some(id),
        }
    }
}

/// Link to the app showing the given story
pub fn story_href(id: &StoryId) -> String {
    format!("/?story={}", urlencoding::encode(id.as_str()))
}

/// The model of the emitted page, element by element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Browser tab title
    pub document_title: String,
    /// `#title`
    pub title: String,
    /// `#publicationDate`
    pub publication_date: String,
    pub story_id: Option<StoryId>,
    /// `#story div.chapters`
    pub chapters: Vec<ChapterSection>,
    /// `#prev`
    pub prev: NavLink,
    /// `#next`
    pub next: NavLink,
}

impl Page {
    /// The unpopulated page
    pub fn shell(site_title: &str) -> Self {
        Self {
            document_title: site_title.to_string(),
            title: String::new(),
            publication_date: String::new(),
            story_id: None,
            chapters: Vec::new(),
            prev: NavLink::hidden(),
            next: NavLink::hidden(),
        }
    }

    pub fn to_html(&self) -> String {
        html::render_page(self)
    }
}

/// Result of building a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Render(Page),
    Redirect(String),
}

/// Builds pages from a store and an image resolver.
#[derive(Clone)]
pub struct PageBuilder {
    store: Arc<dyn DocumentStore>,
    images: Arc<dyn ImageResolver>,
    options: RenderOptions,
}

impl PageBuilder {
    pub fn new(store: Arc<dyn DocumentStore>, images: Arc<dyn ImageResolver>, options: RenderOptions) -> Self {
        Self { store, images, options }
    }

    pub async fn build(&self, request: &StoryRequest) -> PageOutcome {
        let mut page = Page::shell(&self.options.site_title);

        let story = match loader::load_story(self.store.as_ref(), &self.options.collection, request).await {
            Ok(Some(story)) => story,
            Ok(None) => {
                tracing::info!("No story found for {:?}", request.story);
                // Only a named story redirects; `/` would redirect to itself.
                return match (self.options.missing_story, &request.story) {
                    (MissingStoryPolicy::RedirectHome, Some(_)) => PageOutcome::Redirect("/".to_string()),
                    _ => PageOutcome::Render(page),
                };
            }
            Err(e) => {
                tracing::error!("Failed to load story {:?}: {}", request.story, e);
                return PageOutcome::Render(page);
            }
        };

        if let Err(e) = loader::apply_story(&mut page, &story, &self.options.site_title) {
            tracing::error!("Failed to render story {}: {}", story.id, e);
            return PageOutcome::Render(page);
        }

        let (sections, (prev, next)) = tokio::join!(
            chapters::render_chapters(self.images.as_ref(), &story.chapters, self.options.body_format),
            adjacent::resolve_adjacent(
                self.store.as_ref(),
                &self.options.collection,
                story.created_at,
                self.options.nav_glyphs,
            ),
        );

        page.chapters = sections;
        page.prev = prev;
        page.next = next;
        PageOutcome::Render(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::StorageResolver;
    use crate::storage::{Query, SqliteStore};
    use crate::story::{Chapter, Story};
    use crate::Result;

    fn builder_with(stories: &[(&str, &str, i64)], options: RenderOptions) -> PageBuilder {
        let store = SqliteStore::open_in_memory().unwrap();
        for (id, title, created_at) in stories {
            let story = Story::new(*id, *title, *created_at, vec![
                Chapter::new(format!("{} one", title), "Para 1\n\nPara 2", "gs://bucket/1.png"),
                Chapter::new(format!("{} two", title), "Only", "gs://bucket/2.png"),
            ]);
            store.insert_story(&options.collection, &story).unwrap();
        }
        PageBuilder::new(Arc::new(store), Arc::new(StorageResolver::default()), options)
    }

    fn abc() -> PageBuilder {
        builder_with(&[("id-a", "A", 1), ("id-b", "B", 2), ("id-c", "C", 3)], RenderOptions::default())
    }

    fn rendered(outcome: PageOutcome) -> Page {
        match outcome {
            PageOutcome::Render(page) => page,
            PageOutcome::Redirect(to) => panic!("unexpected redirect to {}", to),
        }
    }

    #[tokio::test]
    async fn test_middle_story_links_both_ways() {
        let page = rendered(abc().build(&StoryRequest::for_story("id-b")).await);

        assert_eq!(page.title, "B");
        assert!(page.prev.visible);
        assert_eq!(page.prev.text, "← A");
        assert_eq!(page.prev.href.as_deref(), Some("/?story=id-a"));
        assert!(page.next.visible);
        assert_eq!(page.next.text, "C →");
        assert_eq!(page.next.href.as_deref(), Some("/?story=id-c"));
    }

    #[tokio::test]
    async fn test_newest_story_hides_next() {
        let page = rendered(abc().build(&StoryRequest::for_story("id-c")).await);

        assert_eq!(page.title, "C");
        assert_eq!(page.prev.story_id, Some(StoryId::from("id-b")));
        assert!(!page.next.visible);
        assert!(page.next.href.is_none());
    }

    #[tokio::test]
    async fn test_no_identifier_loads_newest() {
        let page = rendered(abc().build(&StoryRequest::latest()).await);

        assert_eq!(page.story_id, Some(StoryId::from("id-c")));
        assert_eq!(page.prev.story_id, Some(StoryId::from("id-b")));
        assert!(!page.next.visible);
    }

    #[tokio::test]
    async fn test_header_and_chapters() {
        let page = rendered(abc().build(&StoryRequest::for_story("id-a")).await);

        assert_eq!(page.document_title, "A — Short Stories");
        assert_eq!(page.publication_date, "January 1, 1970");
        assert_eq!(page.chapters.len(), 2);
        assert!(page.chapters[0].open);
        assert!(!page.chapters[1].open);
        assert_eq!(page.chapters[0].body_html, "Para 1<br><br>Para 2");
        assert!(page.chapters.iter().all(|c| c.image_url.is_some()));
        assert!(!page.prev.visible);
    }

    #[tokio::test]
    async fn test_missing_story_redirects_home_by_default() {
        let outcome = abc().build(&StoryRequest::for_story("nope")).await;
        assert_eq!(outcome, PageOutcome::Redirect("/".to_string()));
    }

    #[tokio::test]
    async fn test_empty_collection_renders_shell() {
        let page = rendered(builder_with(&[], RenderOptions::default()).build(&StoryRequest::latest()).await);
        assert_eq!(page, Page::shell("Short Stories"));
    }

    #[tokio::test]
    async fn test_missing_story_blank_policy() {
        let options = RenderOptions {
            missing_story: MissingStoryPolicy::Blank,
            ..RenderOptions::default()
        };
        let page = rendered(builder_with(&[], options).build(&StoryRequest::latest()).await);
        assert_eq!(page, Page::shell("Short Stories"));
    }

    #[tokio::test]
    async fn test_literal_body_and_plain_nav() {
        let options = RenderOptions {
            body_format: BodyFormat::Literal,
            nav_glyphs: false,
            ..RenderOptions::default()
        };
        let builder = builder_with(&[("x", "X", 10), ("y", "Y", 20)], options);
        let page = rendered(builder.build(&StoryRequest::for_story("y")).await);

        assert_eq!(page.chapters[0].body_html, "Para 1\n\nPara 2");
        assert_eq!(page.prev.text, "X");
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl DocumentStore for FailingStore {
        async fn run(&self, _query: &Query) -> Result<Vec<Story>> {
            Err(std::io::Error::other("store offline").into())
        }
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_shell() {
        let builder = PageBuilder::new(
            Arc::new(FailingStore),
            Arc::new(StorageResolver::default()),
            RenderOptions::default(),
        );
        let page = rendered(builder.build(&StoryRequest::latest()).await);
        assert_eq!(page, Page::shell("Short Stories"));
    }
}
