//! # Leettrack Core
//!
//! Stats acquisition and account tracking for LeetCode profiles.
//!
//! ## Overview
//!
//! LeetCode has no official public stats api, so stats come from third-party
//! providers that fail independently. This crate provides:
//!
//! - **Handle parsing** from bare handles or profile urls
//! - **Provider adapters** that map each provider's payload into one shape
//! - **Sequential fallback** across providers, first valid answer wins
//! - **Failure classification** into "no such account" and "providers down"
//! - **A tracker** that stores accounts and refreshes them under a rate limit
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`acquirer`] | Provider fallback loop |
//! | [`adapters`] | Built-in provider adapters |
//! | [`attempt`] | Per-attempt outcomes and failure classification |
//! | [`config`] | Defaults, env overrides and the acquirer builder |
//! | [`domain`] | Domain models (Handle, NormalizedStats, UserRecord) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`source`] | Provider identifiers |
//! | [`throttling`] | Rate limiting for bulk refreshes |
//! | [`tracker`] | Tracked accounts and their store |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leettrack_core::{Handle, StatsAcquirer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let acquirer = StatsAcquirer::builder().with_env()?.build()?;
//!
//!     let handle = Handle::parse("https://leetcode.com/u/jdoe/")?;
//!     let stats = acquirer.fetch(handle.as_str()).await?;
//!     println!("{handle} solved {}", stats.total_solved);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Tracker  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ StatsAcquirer   │────▶│ HTTP Client      │
//! │ (fallback loop) │     │ (reqwest/script) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ProviderAdapter │
//! │ (map, validate) │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A failed provider attempt is data, not an error. Only an exhausted chain
//! surfaces, classified for the caller:
//!
//! ```rust
//! use leettrack_core::{AcquisitionError, FailureClass};
//!
//! fn status_for(error: &AcquisitionError) -> u16 {
//!     match error.classification() {
//!         Some(FailureClass::NotFound) => 404,
//!         Some(FailureClass::Unavailable) => 503,
//!         None => 400,
//!     }
//! }
//! ```

pub mod acquirer;
pub mod adapters;
pub mod attempt;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod source;
pub mod throttling;
pub mod tracker;

// Fallback loop
pub use acquirer::{Acquisition, AcquisitionError, StatsAcquirer};

// Adapters
pub use adapters::{default_adapters, MappingError, ProviderAdapter};

// Attempt outcomes
pub use attempt::{AttemptOutcome, FailureClass, FailureReason, ProviderFailure};

// Configuration
pub use config::{
    AcquirerConfig, StatsAcquirerBuilder, DEFAULT_ATTEMPT_TIMEOUT, MIN_ATTEMPT_TIMEOUT,
};

// Domain models
pub use domain::{
    acceptance_rate, normalize_rate, Handle, NormalizedStats, StatsDraft, StatsProgress,
    UserRecord,
};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient, ScriptedHttpClient, ScriptedReply,
};

// Source identifiers
pub use source::ProviderId;

// Throttling
pub use throttling::RefreshThrottle;

// Tracker
pub use tracker::{
    MemoryUserStore, RefreshFailure, RefreshOutcome, RefreshSummary, StoreError, Tracker,
    TrackerError, UserStore,
};
