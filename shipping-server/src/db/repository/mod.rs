//! Repository Module
//!
//! CRUD and counter operations on the embedded SurrealDB tables.

// Orders
pub mod order;

// Tracking
pub mod tracking_sequence;

// Re-exports
pub use order::OrderRepository;
pub use tracking_sequence::TrackingSequenceRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Extract the pure id if it carries a table prefix (e.g. "order:xxx" -> "xxx")
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.strip_prefix(table) {
        Some(rest) => rest.strip_prefix(':').unwrap_or(id),
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("order", "order:abc"), "abc");
        assert_eq!(strip_table_prefix("order", "abc"), "abc");
        // A prefix without the separator is left alone
        assert_eq!(strip_table_prefix("order", "orderabc"), "orderabc");
    }
}
