//! Tracked-account management on top of [`StatsAcquirer`].
//!
//! The tracker is the only caller of the acquirer. It parses raw user input
//! into a [`Handle`], keeps one [`UserRecord`] per lower-cased handle, and
//! maps every failure onto an HTTP-style status via
//! [`TrackerError::status_code`].

mod store;

pub use store::{MemoryUserStore, StoreError, UserStore};

use std::cmp::Reverse;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::acquirer::{AcquisitionError, StatsAcquirer};
use crate::throttling::RefreshThrottle;
use crate::{Handle, StatsProgress, UserRecord, ValidationError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    #[error(transparent)]
    InvalidHandle(#[from] ValidationError),
    #[error("user '{username}' is already tracked")]
    AlreadyTracked { username: String },
    #[error("user '{username}' is not tracked")]
    NotTracked { username: String },
    #[error(transparent)]
    Upstream(#[from] AcquisitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrackerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidHandle(_) | Self::AlreadyTracked { .. } => 400,
            Self::NotTracked { .. } => 404,
            Self::Upstream(AcquisitionError::InvalidInput) => 400,
            Self::Upstream(error) if error.is_not_found() => 404,
            Self::Upstream(_) => 503,
            Self::Store(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHandle(_) => "tracker.invalid_handle",
            Self::AlreadyTracked { .. } => "tracker.already_tracked",
            Self::NotTracked { .. } => "tracker.not_tracked",
            Self::Upstream(error) if error.is_not_found() => "upstream.not_found",
            Self::Upstream(AcquisitionError::InvalidInput) => "upstream.invalid_input",
            Self::Upstream(_) => "upstream.unavailable",
            Self::Store(_) => "tracker.store",
        }
    }
}

/// A refreshed record and how far it moved.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub record: UserRecord,
    pub progress: StatsProgress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshFailure {
    pub username: String,
    pub error: TrackerError,
}

/// Result of [`Tracker::refresh_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshSummary {
    pub refreshed: Vec<RefreshOutcome>,
    pub failed: Vec<RefreshFailure>,
}

impl RefreshSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Tracker {
    acquirer: StatsAcquirer,
    store: Arc<dyn UserStore>,
    throttle: RefreshThrottle,
}

impl Tracker {
    /// Tracker over an empty [`MemoryUserStore`], refreshing at most one
    /// account per second in bulk.
    pub fn new(acquirer: StatsAcquirer) -> Self {
        Self {
            acquirer,
            store: Arc::new(MemoryUserStore::new()),
            throttle: RefreshThrottle::default(),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.throttle = RefreshThrottle::per_interval(interval);
        self
    }

    pub fn acquirer(&self) -> &StatsAcquirer {
        &self.acquirer
    }

    pub async fn add_user(&self, input: &str) -> Result<UserRecord, TrackerError> {
        let handle = Handle::parse(input)?;
        let username = handle.key();

        if self.store.get(&username)?.is_some() {
            return Err(TrackerError::AlreadyTracked { username });
        }

        let stats = self.acquirer.fetch(handle.as_str()).await?;
        let record = UserRecord::new(&handle, stats, OffsetDateTime::now_utc());

        if !self.store.insert_new(record.clone())? {
            return Err(TrackerError::AlreadyTracked { username });
        }

        info!(%username, total_solved = record.stats.total_solved, "user tracked");
        Ok(record)
    }

    pub async fn refresh_user(&self, input: &str) -> Result<RefreshOutcome, TrackerError> {
        let handle = Handle::parse(input)?;
        self.refresh_handle(&handle).await
    }

    /// Every tracked record, most solved first; ties go to the most
    /// recently updated, then to the username.
    pub fn list_users(&self) -> Result<Vec<UserRecord>, TrackerError> {
        let mut records = self.store.list()?;
        records.sort_by(|left, right| {
            Reverse(left.stats.total_solved)
                .cmp(&Reverse(right.stats.total_solved))
                .then_with(|| right.last_updated.cmp(&left.last_updated))
                .then_with(|| left.username.cmp(&right.username))
        });
        Ok(records)
    }

    pub fn delete_user(&self, input: &str) -> Result<UserRecord, TrackerError> {
        let handle = Handle::parse(input)?;
        let username = handle.key();

        match self.store.remove(&username)? {
            Some(record) => {
                info!(%username, "user untracked");
                Ok(record)
            }
            None => Err(TrackerError::NotTracked { username }),
        }
    }

    /// Refreshes every tracked account in turn, waiting on the refresh
    /// throttle before each upstream fetch. Failures are collected, never
    /// fatal to the batch.
    pub async fn refresh_all(&self) -> Result<RefreshSummary, TrackerError> {
        let mut usernames = self
            .store
            .list()?
            .into_iter()
            .map(|record| record.username)
            .collect::<Vec<_>>();
        usernames.sort();

        let mut summary = RefreshSummary::default();
        for username in usernames {
            self.throttle.until_ready().await;

            let result = match Handle::parse(&username) {
                Ok(handle) => self.refresh_handle(&handle).await,
                Err(error) => Err(TrackerError::from(error)),
            };

            match result {
                Ok(outcome) => summary.refreshed.push(outcome),
                Err(error) => {
                    warn!(%username, code = error.code(), %error, "refresh failed");
                    summary.failed.push(RefreshFailure { username, error });
                }
            }
        }

        info!(
            refreshed = summary.refreshed.len(),
            failed = summary.failed.len(),
            "bulk refresh finished"
        );
        Ok(summary)
    }

    async fn refresh_handle(&self, handle: &Handle) -> Result<RefreshOutcome, TrackerError> {
        let username = handle.key();
        let Some(mut record) = self.store.get(&username)? else {
            return Err(TrackerError::NotTracked { username });
        };

        let stats = self.acquirer.fetch(handle.as_str()).await?;
        let progress = StatsProgress::between(&record.stats, &stats);
        record.update(stats, OffsetDateTime::now_utc());

        if !self.store.replace(record.clone())? {
            return Err(TrackerError::NotTracked { username });
        }

        info!(%username, delta = progress.total_solved, "user refreshed");
        Ok(RefreshOutcome { record, progress })
    }
}
