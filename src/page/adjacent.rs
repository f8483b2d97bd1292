//! Previous/next story lookup
//!
//! Both directions are queried concurrently. Each one fills its link when a
//! neighbour exists and hides it otherwise, including when the lookup fails.

use crate::page::NavLink;
use crate::storage::{DocumentStore, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn query(&self, collection: &str, created_at: i64) -> Query {
        match self {
            Direction::Previous => Query::previous(collection, created_at),
            Direction::Next => Query::next(collection, created_at),
        }
    }

    fn label(&self, title: &str, glyphs: bool) -> String {
        match (self, glyphs) {
            (_, false) => title.to_string(),
            (Direction::Previous, true) => format!("← {}", title),
            (Direction::Next, true) => format!("{} →", title),
        }
    }
}

/// Resolve the `(previous, next)` links around `created_at`
pub async fn resolve_adjacent(
    store: &dyn DocumentStore,
    collection: &str,
    created_at: i64,
    glyphs: bool,
) -> (NavLink, NavLink) {
    tokio::join!(
        adjacent_link(store, collection, created_at, Direction::Previous, glyphs),
        adjacent_link(store, collection, created_at, Direction::Next, glyphs),
    )
}

pub async fn adjacent_link(
    store: &dyn DocumentStore,
    collection: &str,
    created_at: i64,
    direction: Direction,
    glyphs: bool,
) -> NavLink {
    match store.run(&direction.query(collection, created_at)).await {
        Ok(stories) => match stories.into_iter().next() {
            Some(story) => {
                tracing::debug!("{:?} story: {}", direction, story.id);
                NavLink::to_story(story.id, direction.label(&story.title, glyphs))
            }
            None => NavLink::hidden(),
        },
        Err(e) => {
            tracing::error!("{:?} story lookup failed: {}", direction, e);
            NavLink::hidden()
        }
    }
}
