//! Tracking Sequence Repository
//!
//! Atomic per-key counters backing the tracking-code generator. The whole
//! increment-or-create is a single `UPSERT` statement, so concurrent
//! requests for the same key serialize inside the storage engine and no
//! two callers ever observe the same counter value. An in-process lock
//! would not be enough: multiple stateless server instances may share the
//! same store.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::TrackingSequence;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "tracking_sequence";

/// Conflict retry budget. The embedded engine resolves concurrent
/// transactions optimistically and may reject one side.
const MAX_ATTEMPTS: u32 = 8;

#[derive(Clone)]
pub struct TrackingSequenceRepository {
    base: BaseRepository,
}

impl TrackingSequenceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Increment the counter for `key`, creating it at 1 on first use.
    ///
    /// Returns the post-increment value.
    pub async fn next_counter(&self, key: &str) -> RepoResult<i64> {
        let mut last_err = RepoError::Database("sequence upsert returned no row".to_string());

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_increment(key).await {
                Ok(counter) => return Ok(counter),
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        attempt,
                        error = %e,
                        "tracking sequence increment failed, retrying"
                    );
                    last_err = e;
                    tokio::time::sleep(Duration::from_millis(5 * attempt as u64)).await;
                }
            }
        }

        Err(last_err)
    }

    async fn try_increment(&self, key: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("UPSERT type::thing($tb, $key) SET key = $key, counter += 1 RETURN AFTER")
            .bind(("tb", TABLE))
            .bind(("key", key.to_string()))
            .await?;
        let rows: Vec<TrackingSequence> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.counter)
            .ok_or_else(|| RepoError::Database("sequence upsert returned no row".to_string()))
    }

    /// Current counter for `key` without incrementing (0 when absent)
    pub async fn current(&self, key: &str) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT key, counter FROM type::thing($tb, $key)")
            .bind(("tb", TABLE))
            .bind(("key", key.to_string()))
            .await?;
        let rows: Vec<TrackingSequence> = result.take(0)?;
        Ok(rows.into_iter().next().map(|row| row.counter).unwrap_or(0))
    }
}
