//! Lecture store abstraction
//!
//! Handlers receive a `dyn LectureStore` through application state, so the
//! same routes run against Postgres in production and a fixture in tests.

use async_trait::async_trait;

use crate::models::{Batch, Lecture, LectureFilter};

/// Store failure. Display is the underlying error text, unchanged, because the
/// HTTP layer passes it through to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// A fixture row references a record that does not exist
    #[error("{table} {id} references missing {relation} {relation_id}")]
    DanglingReference {
        table: &'static str,
        id: i64,
        relation: &'static str,
        relation_id: i64,
    },

    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Generic store failure with a message
    #[error("{0}")]
    Unavailable(String),
}

/// Read access to lectures and batches.
#[async_trait]
pub trait LectureStore: Send + Sync {
    /// Lectures matching every condition in `filter`, with batch, subject,
    /// faculty and room loaded, ordered by lecture id.
    async fn list_lectures(&self, filter: &LectureFilter) -> Result<Vec<Lecture>, StoreError>;

    /// The batch with exactly this course and year. The lowest id wins when
    /// several match.
    async fn find_batch(&self, course_id: i64, year: i64) -> Result<Option<Batch>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
