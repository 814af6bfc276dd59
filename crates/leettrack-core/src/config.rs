//! Acquirer configuration.
//!
//! Defaults live in code; [`AcquirerConfig::from_env`] layers environment
//! overrides on top; builder methods override both.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `LEETTRACK_TIMEOUT_MS` | Per-attempt timeout | `10000` |
//! | `LEETTRACK_PROVIDERS` | Comma-separated provider order | `leetcode-api-pied,leetcode-restful-api,tashif-api` |
//! | `LEETTRACK_PIED_BASE_URL` | Base url of `leetcode-api-pied` | public deployment |
//! | `LEETTRACK_RESTFUL_BASE_URL` | Base url of `leetcode-restful-api` | public deployment |
//! | `LEETTRACK_TASHIF_BASE_URL` | Base url of `tashif-api` | public deployment |
//! | `LEETTRACK_USER_AGENT` | `User-Agent` header | `leettrack/<version>` |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use leettrack_core::{ProviderId, StatsAcquirer};
//!
//! let acquirer = StatsAcquirer::builder()
//!     .with_env()?
//!     .with_providers(vec![ProviderId::Tashif, ProviderId::Pied])
//!     .with_attempt_timeout(Duration::from_secs(5))
//!     .build()?;
//! ```

use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::acquirer::StatsAcquirer;
use reqwest::header::HeaderValue;

use crate::adapters::ProviderAdapter;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{ProviderId, ValidationError};

pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);
/// Requests carry their timeout in whole milliseconds.
pub const MIN_ATTEMPT_TIMEOUT: Duration = Duration::from_millis(1);

const TIMEOUT_VAR: &str = "LEETTRACK_TIMEOUT_MS";
const PROVIDERS_VAR: &str = "LEETTRACK_PROVIDERS";
const USER_AGENT_VAR: &str = "LEETTRACK_USER_AGENT";

const fn base_url_var(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Pied => "LEETTRACK_PIED_BASE_URL",
        ProviderId::Restful => "LEETTRACK_RESTFUL_BASE_URL",
        ProviderId::Tashif => "LEETTRACK_TASHIF_BASE_URL",
    }
}

/// Process-wide acquisition settings, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquirerConfig {
    pub attempt_timeout: Duration,
    pub providers: Vec<ProviderId>,
    pub base_urls: HashMap<ProviderId, String>,
    pub user_agent: String,
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            providers: ProviderId::ALL.to_vec(),
            base_urls: HashMap::new(),
            user_agent: String::from(ReqwestHttpClient::DEFAULT_USER_AGENT),
        }
    }
}

impl AcquirerConfig {
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ValidationError::InvalidSetting {
                    key: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            self.attempt_timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(PROVIDERS_VAR) {
            self.providers = raw
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::parse::<ProviderId>)
                .collect::<Result<Vec<_>, _>>()?;
        }

        for provider in ProviderId::ALL {
            if let Some(url) = lookup(base_url_var(provider)).filter(|url| !url.trim().is_empty()) {
                self.base_urls.insert(provider, url.trim().to_owned());
            }
        }

        if let Some(user_agent) = lookup(USER_AGENT_VAR).filter(|value| !value.trim().is_empty()) {
            self.user_agent = user_agent;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.attempt_timeout < MIN_ATTEMPT_TIMEOUT {
            return Err(ValidationError::TimeoutTooShort {
                min_ms: MIN_ATTEMPT_TIMEOUT.as_millis() as u64,
            });
        }
        if self.providers.is_empty() {
            return Err(ValidationError::EmptyProviderChain);
        }
        if HeaderValue::from_str(&self.user_agent).is_err() {
            return Err(ValidationError::InvalidSetting {
                key: USER_AGENT_VAR,
                value: self.user_agent.clone(),
            });
        }
        Ok(())
    }

    /// Provider chain in configured order, duplicates dropped.
    pub fn adapters(&self) -> Vec<ProviderAdapter> {
        dedupe_chain(&self.providers)
            .into_iter()
            .map(|provider| {
                let adapter = ProviderAdapter::for_provider(provider);
                match self.base_urls.get(&provider) {
                    Some(url) => adapter.with_base_url(url.as_str()),
                    None => adapter,
                }
            })
            .collect()
    }
}

fn dedupe_chain(chain: &[ProviderId]) -> Vec<ProviderId> {
    let mut seen = HashSet::new();
    let mut output = Vec::with_capacity(chain.len());

    for provider in chain {
        if seen.insert(*provider) {
            output.push(*provider);
        }
    }

    output
}

/// Builder for [`StatsAcquirer`].
///
/// Without an explicit client the acquirer talks to the providers through
/// [`ReqwestHttpClient`].
#[derive(Default)]
pub struct StatsAcquirerBuilder {
    config: AcquirerConfig,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl StatsAcquirerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `LEETTRACK_*` environment overrides onto the current settings.
    pub fn with_env(mut self) -> Result<Self, ValidationError> {
        self.config = self.config.with_overrides(|key| env::var(key).ok())?;
        Ok(self)
    }

    pub fn with_config(mut self, config: AcquirerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.config.attempt_timeout = timeout;
        self
    }

    pub fn with_providers(mut self, providers: Vec<ProviderId>) -> Self {
        self.config.providers = providers;
        self
    }

    pub fn with_base_url(mut self, provider: ProviderId, base_url: impl Into<String>) -> Self {
        self.config.base_urls.insert(provider, base_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn config(&self) -> &AcquirerConfig {
        &self.config
    }

    pub fn build(self) -> Result<StatsAcquirer, ValidationError> {
        self.config.validate()?;

        let http_client = self.http_client.unwrap_or_else(|| {
            Arc::new(ReqwestHttpClient::with_user_agent(&self.config.user_agent))
        });

        Ok(StatsAcquirer::new(
            self.config.adapters(),
            http_client,
            self.config.attempt_timeout,
        ))
    }
}
