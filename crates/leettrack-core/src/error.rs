use thiserror::Error;

/// Validation and contract errors exposed by `leettrack-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("handle cannot be empty")]
    EmptyHandle,
    #[error("handle length {len} exceeds max {max}")]
    HandleTooLong { len: usize, max: usize },
    #[error("handle contains invalid character '{ch}' at index {index}")]
    HandleInvalidChar { ch: char, index: usize },
    #[error("'{value}' is not a recognized leetcode profile url")]
    UnrecognizedProfileUrl { value: String },

    #[error("field '{field}' is missing")]
    MissingValue { field: &'static str },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' is too large to represent")]
    ValueOutOfRange { field: &'static str },

    #[error("invalid provider '{value}', expected one of leetcode-api-pied, leetcode-restful-api, tashif-api")]
    InvalidProvider { value: String },
    #[error("provider chain must contain at least one provider")]
    EmptyProviderChain,
    #[error("attempt timeout must be at least {min_ms}ms")]
    TimeoutTooShort { min_ms: u64 },
    #[error("invalid value '{value}' for {key}")]
    InvalidSetting { key: &'static str, value: String },
}
