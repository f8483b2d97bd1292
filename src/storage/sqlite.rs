//! SQLite storage implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use rusqlite::{Connection, params, params_from_iter};
use rusqlite::types::Value;
use crate::Result;
use crate::story::{Story, StoryBody, StoryId};
use super::query::{Filter, Query};
use super::{schema, DocumentStore};

/// SQLite-backed document store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.initialize_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn();
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Story Operations ==========

    /// Insert or replace a story document
    pub fn insert_story(&self, collection: &str, story: &Story) -> Result<()> {
        let body = serde_json::to_string(&StoryBody::from(story))?;
        self.conn().execute(
            r#"
            INSERT OR REPLACE INTO documents (collection, id, created_at, body)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![collection, story.id.as_str(), story.created_at, body],
        )?;
        Ok(())
    }

    /// Run a query synchronously
    pub fn query(&self, query: &Query) -> Result<Vec<Story>> {
        let mut sql = String::from("SELECT id, created_at, body FROM documents WHERE collection = ?1");
        let mut values = vec![Value::Text(query.collection.clone())];

        match &query.filter {
            Some(Filter::IdEq(id)) => {
                sql.push_str(" AND id = ?2");
                values.push(Value::Text(id.as_str().to_string()));
            }
            Some(Filter::CreatedAt(cmp, created_at)) => {
                sql.push_str(&format!(" AND created_at {} ?2", cmp.as_sql()));
                values.push(Value::Integer(*created_at));
            }
            None => {}
        }

        if let Some(order) = query.order {
            sql.push_str(&format!(" ORDER BY created_at {}", order.as_sql()));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut stories = Vec::new();
        for row in rows {
            let (id, created_at, body) = row?;
            stories.push(Self::row_to_story(id, created_at, &body)?);
        }
        Ok(stories)
    }

    /// Count documents in a collection
    pub fn count(&self, collection: &str) -> Result<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            [collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Get statistics for a collection
    pub fn stats(&self, collection: &str) -> Result<DbStats> {
        let oldest = self
            .query(&Query::collection(collection).order_by_created_at(super::Order::Ascending).limit(1))?
            .into_iter()
            .next();
        let newest = self.query(&Query::latest(collection))?.into_iter().next();

        Ok(DbStats {
            collection: collection.to_string(),
            stories: self.count(collection)?,
            oldest,
            newest,
        })
    }

    /// Helper to convert a row to a Story
    fn row_to_story(id: String, created_at: i64, body: &str) -> Result<Story> {
        let body: StoryBody = serde_json::from_str(body)?;
        Ok(Story {
            id: StoryId::new(id),
            title: body.title,
            created_at,
            chapters: body.chapters,
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for SqliteStore {
    async fn run(&self, query: &Query) -> Result<Vec<Story>> {
        self.query(query)
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub collection: String,
    pub stories: usize,
    pub oldest: Option<Story>,
    pub newest: Option<Story>,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Collection: {}", self.collection)?;
        writeln!(f, "  Stories: {}", self.stories)?;
        if let Some(oldest) = &self.oldest {
            writeln!(f, "  Oldest: {} ({})", oldest.title, oldest.id)?;
        }
        if let Some(newest) = &self.newest {
            writeln!(f, "  Newest: {} ({})", newest.title, newest.id)?;
        }
        Ok(())
    }
}
