//! Tracking Sequence Model

use serde::{Deserialize, Serialize};

/// One monotonic counter row, scoped by format/branch/date
///
/// The record id doubles as the scope key (e.g. `"ORD:ABC:20250115"`).
/// Rows are created lazily with counter 1 and only ever incremented;
/// the extra `id` field returned by SurrealDB is ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingSequence {
    pub key: String,
    pub counter: i64,
}
