//! Database schema definitions

/// SQL to create the documents table
///
/// One row per document; `body` holds the JSON of everything except the id
/// and the `createdAt` ordering key.
pub const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    body TEXT NOT NULL,
    PRIMARY KEY (collection, id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_documents_created_at ON documents(collection, created_at)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_DOCUMENTS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
