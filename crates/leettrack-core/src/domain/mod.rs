//! # Domain Models
//!
//! Canonical domain types for leettrack.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Handle`] | Validated account handle, parsed from a handle or profile url |
//! | [`NormalizedStats`] | Provider-independent solve statistics |
//! | [`StatsDraft`] | Mapped provider output awaiting validation |
//! | [`StatsProgress`] | Signed delta between two snapshots |
//! | [`UserRecord`] | Tracked account with timestamps |
//!
//! ## Validation
//!
//! Handles are validated at construction; stats are validated when a
//! [`StatsDraft`] is turned into [`NormalizedStats`]:
//!
//! ```rust
//! use leettrack_core::{Handle, StatsDraft};
//!
//! let handle = Handle::parse("https://leetcode.com/u/jdoe123/").unwrap();
//! assert_eq!(handle.as_str(), "jdoe123");
//!
//! let missing_total = StatsDraft::default();
//! assert!(missing_total.validate().is_err());
//! ```

mod handle;
mod record;
mod stats;

pub use handle::Handle;
pub use record::UserRecord;
pub use stats::{acceptance_rate, normalize_rate, NormalizedStats, StatsDraft, StatsProgress};
