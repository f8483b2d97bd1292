//! Chapter sections
//!
//! Every chapter becomes a collapsible section; only the first starts open.
//! Images are resolved concurrently and may fail independently.

use futures::stream::{self, StreamExt};
use crate::images::ImageResolver;
use crate::page::{BodyFormat, ChapterSection};
use crate::story::Chapter;

/// Image lookups in flight per page
const IMAGE_CONCURRENCY: usize = 4;

pub async fn render_chapters(
    images: &dyn ImageResolver,
    chapters: &[Chapter],
    format: BodyFormat,
) -> Vec<ChapterSection> {
    let mut sections: Vec<ChapterSection> = chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| ChapterSection {
            title: chapter.chapter_title.clone(),
            body_html: format.render(&chapter.chapter_content),
            open: i == 0,
            image_url: None,
        })
        .collect();

    let lookups: Vec<_> = chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| async move { (i, images.resolve(&chapter.image).await) })
        .collect();
    let mut resolved = stream::iter(lookups).buffer_unordered(IMAGE_CONCURRENCY);

    while let Some((i, result)) = resolved.next().await {
        match result {
            Ok(url) => sections[i].image_url = Some(url),
            Err(e) => {
                tracing::warn!("No image for chapter '{}': {}", chapters[i].chapter_title, e);
            }
        }
    }

    sections
}
