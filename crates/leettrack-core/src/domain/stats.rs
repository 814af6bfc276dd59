use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical solve statistics, identical regardless of the provider they
/// came from.
///
/// `total_solved` is not required to equal the sum of the per-difficulty
/// counts; providers are not always consistent with themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStats {
    pub total_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    #[serde(default)]
    pub ranking: u64,
    /// Percentage in `0.00..=100.00`, two decimals.
    pub acceptance_rate: f64,
}

/// Provider output after mapping, before the validity check.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsDraft {
    pub total_solved: Option<f64>,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub ranking: u64,
    pub acceptance_rate: f64,
}

impl StatsDraft {
    /// Accepts the draft iff the total is present, finite, non-negative and
    /// fits a `u64`.
    ///
    /// A total of zero passes: it cannot be told apart from a provider that
    /// silently defaulted the field.
    pub fn validate(self) -> Result<NormalizedStats, ValidationError> {
        let total = self.total_solved.ok_or(ValidationError::MissingValue {
            field: "total_solved",
        })?;
        if !total.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "total_solved",
            });
        }
        if total < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "total_solved",
            });
        }
        if total >= u64::MAX as f64 {
            return Err(ValidationError::ValueOutOfRange {
                field: "total_solved",
            });
        }

        Ok(NormalizedStats {
            total_solved: total.trunc() as u64,
            easy_solved: self.easy_solved,
            medium_solved: self.medium_solved,
            hard_solved: self.hard_solved,
            ranking: self.ranking,
            acceptance_rate: normalize_rate(self.acceptance_rate),
        })
    }
}

/// `solved / submissions * 100`, two decimals, zero when nothing was
/// submitted.
pub fn acceptance_rate(total_solved: u64, total_submissions: u64) -> f64 {
    if total_submissions == 0 {
        return 0.0;
    }
    normalize_rate(total_solved as f64 / total_submissions as f64 * 100.0)
}

/// Clamps a reported percentage into `0..=100` and rounds it to two
/// decimals. Non-finite input reads as zero.
pub fn normalize_rate(rate: f64) -> f64 {
    if !rate.is_finite() {
        return 0.0;
    }
    round_two_decimals(rate.clamp(0.0, 100.0))
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Signed change of the solve counts between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsProgress {
    pub total_solved: i64,
    pub easy_solved: i64,
    pub medium_solved: i64,
    pub hard_solved: i64,
}

impl StatsProgress {
    pub fn between(previous: &NormalizedStats, current: &NormalizedStats) -> Self {
        Self {
            total_solved: delta(previous.total_solved, current.total_solved),
            easy_solved: delta(previous.easy_solved, current.easy_solved),
            medium_solved: delta(previous.medium_solved, current.medium_solved),
            hard_solved: delta(previous.hard_solved, current.hard_solved),
        }
    }
}

fn delta(previous: u64, current: u64) -> i64 {
    let previous = i64::try_from(previous).unwrap_or(i64::MAX);
    let current = i64::try_from(current).unwrap_or(i64::MAX);
    current.saturating_sub(previous)
}
