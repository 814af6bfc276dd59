//! Sequential provider fallback.
//!
//! [`StatsAcquirer`] asks each configured provider in turn and returns the
//! first structurally valid answer. A provider that times out, answers with a
//! non-2xx status, or sends a payload that cannot be mapped is recorded and
//! skipped; only running out of providers is an error.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::adapters::ProviderAdapter;
use crate::attempt::{AttemptOutcome, FailureClass, FailureReason, ProviderFailure};
use crate::config::StatsAcquirerBuilder;
use crate::http_client::HttpClient;
use crate::{NormalizedStats, ProviderId};

/// Successful acquisition with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    pub stats: NormalizedStats,
    pub provider: ProviderId,
    /// Every provider asked, in order, ending with `provider`.
    pub attempted: Vec<ProviderId>,
    /// Failures absorbed before `provider` answered.
    pub failures: Vec<ProviderFailure>,
    pub latency_ms: u64,
}

/// Terminal acquisition failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("identifier must not be empty")]
    InvalidInput,
    #[error("{}", exhausted_message(.identifier, .classification, .attempted))]
    Exhausted {
        identifier: String,
        classification: FailureClass,
        attempted: Vec<ProviderId>,
        failures: Vec<ProviderFailure>,
    },
}

impl AcquisitionError {
    pub const fn classification(&self) -> Option<FailureClass> {
        match self {
            Self::InvalidInput => None,
            Self::Exhausted { classification, .. } => Some(*classification),
        }
    }

    pub fn attempted(&self) -> &[ProviderId] {
        match self {
            Self::InvalidInput => &[],
            Self::Exhausted { attempted, .. } => attempted,
        }
    }

    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            Self::InvalidInput => &[],
            Self::Exhausted { failures, .. } => failures,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.classification() == Some(FailureClass::NotFound)
    }
}

fn exhausted_message(
    identifier: &str,
    classification: &FailureClass,
    attempted: &[ProviderId],
) -> String {
    let providers = attempted
        .iter()
        .map(|provider| provider.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match classification {
        FailureClass::NotFound => {
            format!("leetcode user '{identifier}' not found (providers tried: {providers})")
        }
        FailureClass::Unavailable => format!(
            "unable to fetch leetcode stats for '{identifier}': all providers ({providers}) are currently unavailable"
        ),
    }
}

/// Ordered provider chain plus the transport used to reach it.
///
/// Cheap to clone; clones share the immutable provider list and client.
#[derive(Clone)]
pub struct StatsAcquirer {
    adapters: Arc<[ProviderAdapter]>,
    http_client: Arc<dyn HttpClient>,
    attempt_timeout: Duration,
}

impl StatsAcquirer {
    pub fn new(
        adapters: impl Into<Arc<[ProviderAdapter]>>,
        http_client: Arc<dyn HttpClient>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            adapters: adapters.into(),
            http_client,
            attempt_timeout,
        }
    }

    pub fn builder() -> StatsAcquirerBuilder {
        StatsAcquirerBuilder::new()
    }

    pub fn adapters(&self) -> &[ProviderAdapter] {
        &self.adapters
    }

    pub const fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Fetches stats for `identifier`, falling back across providers.
    pub async fn fetch(&self, identifier: &str) -> Result<NormalizedStats, AcquisitionError> {
        self.acquire(identifier)
            .await
            .map(|acquisition| acquisition.stats)
    }

    /// Like [`fetch`](Self::fetch) but keeps the attempt chain.
    pub async fn acquire(&self, identifier: &str) -> Result<Acquisition, AcquisitionError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AcquisitionError::InvalidInput);
        }

        let started = Instant::now();
        let mut attempted = Vec::with_capacity(self.adapters.len());
        let mut failures = Vec::new();

        for adapter in self.adapters.iter() {
            let provider = adapter.id();
            attempted.push(provider);
            debug!(%provider, identifier, "requesting stats");

            match self.attempt(adapter, identifier).await {
                AttemptOutcome::Success(stats) => {
                    let latency_ms = elapsed_ms(started);
                    info!(
                        %provider,
                        identifier,
                        latency_ms,
                        skipped = failures.len(),
                        "stats acquired"
                    );
                    return Ok(Acquisition {
                        stats,
                        provider,
                        attempted,
                        failures,
                        latency_ms,
                    });
                }
                AttemptOutcome::Failed(reason) => {
                    warn!(%provider, identifier, code = reason.code(), %reason, "provider attempt failed");
                    failures.push(ProviderFailure { provider, reason });
                }
            }
        }

        let classification = FailureClass::classify(&failures);
        warn!(
            identifier,
            %classification,
            attempts = attempted.len(),
            "all providers failed"
        );

        Err(AcquisitionError::Exhausted {
            identifier: identifier.to_owned(),
            classification,
            attempted,
            failures,
        })
    }

    async fn attempt(&self, adapter: &ProviderAdapter, identifier: &str) -> AttemptOutcome {
        let timeout_ms = duration_ms(self.attempt_timeout);
        let request = adapter.build_request(identifier, timeout_ms);

        let response =
            match tokio::time::timeout(self.attempt_timeout, self.http_client.execute(request)).await
            {
                Err(_elapsed) => return AttemptOutcome::Failed(FailureReason::Timeout { timeout_ms }),
                Ok(Err(error)) if error.is_timeout() => {
                    return AttemptOutcome::Failed(FailureReason::Timeout { timeout_ms })
                }
                Ok(Err(error)) => {
                    return AttemptOutcome::Failed(FailureReason::Transport(error.to_string()))
                }
                Ok(Ok(response)) => response,
            };

        if !response.is_success() {
            return AttemptOutcome::Failed(FailureReason::Status {
                status: response.status,
            });
        }

        let validated = adapter
            .map_response(&response.body)
            .map_err(FailureReason::from)
            .and_then(|draft| draft.validate().map_err(FailureReason::from));

        match validated {
            Ok(stats) => AttemptOutcome::Success(stats),
            Err(reason) => AttemptOutcome::Failed(reason),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis().min(u128::from(u64::MAX)) as u64
}

fn elapsed_ms(started: Instant) -> u64 {
    duration_ms(started.elapsed())
}
