use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Handle, NormalizedStats};

/// A tracked account and its latest stats snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Lower-cased handle.
    pub username: String,
    #[serde(flatten)]
    pub stats: NormalizedStats,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl UserRecord {
    pub fn new(handle: &Handle, stats: NormalizedStats, now: OffsetDateTime) -> Self {
        Self {
            username: handle.key(),
            stats,
            created_at: now,
            last_updated: now,
        }
    }

    pub fn update(&mut self, stats: NormalizedStats, now: OffsetDateTime) {
        self.stats = stats;
        self.last_updated = now;
    }
}
