//! Storage Layer - document store abstraction and SQLite backend
//!
//! Stories live in a named collection and are looked up by:
//! - id equality
//! - `createdAt` comparison against a reference timestamp
//! - `createdAt` ordering with a result limit

pub mod query;
pub mod schema;
pub mod sqlite;

pub use query::{Comparison, Filter, Order, Query};
pub use sqlite::{SqliteStore, DbStats};

use crate::Result;
use crate::story::Story;

/// Read access to a collection of story documents.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a query and return matching stories in query order
    async fn run(&self, query: &Query) -> Result<Vec<Story>>;
}
