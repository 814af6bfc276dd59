//! Payload fragments shared by the provider schemas.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{acceptance_rate, StatsDraft};

use super::MappingError;

/// Numeric field that providers send either as a JSON number or as a
/// string with a leading number (`"34"`, `"63.46%"`). Anything else reads
/// as absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Count(Option<f64>);

impl Count {
    pub(crate) fn value(self) -> Option<f64> {
        self.0
    }

    /// Non-negative integer view, zero when absent or unusable.
    pub(crate) fn or_zero(self) -> u64 {
        match self.0 {
            Some(value) if value.is_finite() && value >= 0.0 => value.trunc() as u64,
            _ => 0,
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let parsed = match raw {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => leading_number(&text),
            _ => None,
        };
        Ok(Self(parsed))
    }
}

/// Longest numeric prefix of `text`, ignoring surrounding whitespace.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let end = text
        .find(|ch: char| !(ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    (1..=end)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
}

/// Difficulty tier labels used by the bucketed schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Difficulty {
    All,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// One `{difficulty, count}` pair.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DifficultyCount {
    #[serde(default)]
    difficulty: String,
    #[serde(default)]
    count: Count,
}

fn bucket(buckets: &[DifficultyCount], tier: Difficulty) -> Count {
    buckets
        .iter()
        .find(|entry| entry.difficulty.trim().eq_ignore_ascii_case(tier.label()))
        .map(|entry| entry.count)
        .unwrap_or_default()
}

/// Accepted/total submission buckets, as nested under `submitStats` and
/// `submitStatsGlobal`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitStats {
    #[serde(default)]
    ac_submission_num: Option<Vec<DifficultyCount>>,
    #[serde(default)]
    total_submission_num: Option<Vec<DifficultyCount>>,
}

impl SubmitStats {
    /// The `All` bucket is the only source of the total; it is never
    /// reconstructed from the other tiers.
    pub(crate) fn into_draft(self, ranking: u64) -> StatsDraft {
        let accepted = self.ac_submission_num.unwrap_or_default();
        let submitted = self.total_submission_num.unwrap_or_default();

        let total = bucket(&accepted, Difficulty::All);
        let submissions = bucket(&submitted, Difficulty::All).or_zero();

        StatsDraft {
            total_solved: total.value(),
            easy_solved: bucket(&accepted, Difficulty::Easy).or_zero(),
            medium_solved: bucket(&accepted, Difficulty::Medium).or_zero(),
            hard_solved: bucket(&accepted, Difficulty::Hard).or_zero(),
            ranking,
            acceptance_rate: acceptance_rate(total.or_zero(), submissions),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Profile {
    #[serde(default)]
    pub(crate) ranking: Count,
}

/// Every provider answers with a top-level object; arrays, strings and
/// scalars are schema mismatches even when every field is optional.
pub(crate) fn parse_json<T>(body: &str) -> Result<T, MappingError>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(MappingError::UnexpectedShape(format!(
            "expected a json object, found {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(MappingError::from)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
