//! Record storage behind the tracker.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;

use crate::UserRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Persistence for tracked accounts.
///
/// Keys are lower-cased usernames; implementations compare them
/// case-insensitively.
pub trait UserStore: Send + Sync {
    fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Inserts `record` unless its username is already present. Returns
    /// `false` when nothing was written.
    fn insert_new(&self, record: UserRecord) -> Result<bool, StoreError>;

    /// Replaces an existing record. Returns `false` when the username is not
    /// tracked.
    fn replace(&self, record: UserRecord) -> Result<bool, StoreError>;

    fn remove(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    fn list(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// In-memory store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    records: Arc<DashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn key(username: &str) -> String {
    username.to_ascii_lowercase()
}

impl UserStore for MemoryUserStore {
    fn get(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .records
            .get(&key(username))
            .map(|entry| entry.value().clone()))
    }

    fn insert_new(&self, record: UserRecord) -> Result<bool, StoreError> {
        match self.records.entry(key(&record.username)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                debug!(username = %record.username, "storing new record");
                slot.insert(record);
                Ok(true)
            }
        }
    }

    fn replace(&self, record: UserRecord) -> Result<bool, StoreError> {
        match self.records.get_mut(&key(&record.username)) {
            Some(mut entry) => {
                *entry = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .records
            .remove(&key(username))
            .map(|(_, record)| record))
    }

    fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
