//! The durable checkpoint record.

use crate::outcome::Outcome;
use crate::query::Fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One durable record: this fingerprint finished, with this outcome, at
/// this time, yielding this many articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    /// The query identity this record resolves.
    pub fingerprint: Fingerprint,
    /// Its terminal outcome.
    pub outcome: Outcome,
    /// How many articles it yielded (0 for any non-`Ok` outcome).
    pub article_count: usize,
    /// When the record was written, in UTC.
    pub completed_at: DateTime<Utc>,
}
