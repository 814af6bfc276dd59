use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::MappingError;
use crate::{NormalizedStats, ProviderId, ValidationError};

/// Why a single provider attempt produced no stats.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FailureReason {
    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {status}")]
    Status { status: u16 },
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("invalid stats: {0}")]
    Invalid(#[from] ValidationError),
}

impl FailureReason {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "provider.timeout",
            Self::Transport(_) => "provider.transport",
            Self::Status { status: 404 } => "provider.not_found",
            Self::Status { .. } => "provider.status",
            Self::Mapping(_) => "provider.mapping",
            Self::Invalid(_) => "provider.invalid_stats",
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404 })
    }
}

/// A recorded failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub reason: FailureReason,
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.reason)
    }
}

/// Result of asking one provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success(NormalizedStats),
    Failed(FailureReason),
}

/// Aggregate classification of an exhausted chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// At least one provider answered 404 for the account.
    NotFound,
    Unavailable,
}

impl FailureClass {
    pub fn classify(failures: &[ProviderFailure]) -> Self {
        if failures.iter().any(|failure| failure.reason.is_not_found()) {
            Self::NotFound
        } else {
            Self::Unavailable
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
        }
    }
}

impl Display for FailureClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
