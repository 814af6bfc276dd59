use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_HANDLE_LEN: usize = 30;
const PROFILE_HOST: &str = "leetcode.com/";
const ACCEPTED_URL_PREFIXES: [&str; 6] = [
    "",
    "www.",
    "http://",
    "https://",
    "http://www.",
    "https://www.",
];

/// Validated leetcode account handle.
///
/// Case is preserved; case-insensitive comparison is left to storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Extracts a handle from a bare handle or a profile url.
    ///
    /// Accepted url shapes: optional scheme, optional `www.`, optional `/u/`
    /// segment, optional trailing slash, query or fragment.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyHandle);
        }

        let candidate = match profile_path(trimmed) {
            Some(path) => handle_from_profile_path(trimmed, path)?,
            None => trimmed,
        };

        validate(candidate)?;
        Ok(Self(candidate.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form used as a storage key.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

/// Returns the part of `input` following `leetcode.com/` when the input is a
/// profile url.
fn profile_path(input: &str) -> Option<&str> {
    let lowered = input.to_ascii_lowercase();
    let host_at = lowered.find(PROFILE_HOST)?;
    if !ACCEPTED_URL_PREFIXES.contains(&&lowered[..host_at]) {
        return None;
    }
    // ascii lowering keeps byte offsets stable
    Some(&input[host_at + PROFILE_HOST.len()..])
}

fn handle_from_profile_path<'a>(input: &str, path: &'a str) -> Result<&'a str, ValidationError> {
    let unrecognized = || ValidationError::UnrecognizedProfileUrl {
        value: input.to_owned(),
    };

    let path = match path.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("u/") => &path[2..],
        _ => path,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() || path.contains('/') {
        return Err(unrecognized());
    }
    Ok(path)
}

fn validate(candidate: &str) -> Result<(), ValidationError> {
    let len = candidate.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyHandle);
    }
    if len > MAX_HANDLE_LEN {
        return Err(ValidationError::HandleTooLong {
            len,
            max: MAX_HANDLE_LEN,
        });
    }

    for (index, ch) in candidate.chars().enumerate() {
        let valid = ch.is_ascii_alphanumeric() || ch == '_' || ch == '-';
        if !valid {
            return Err(ValidationError::HandleInvalidChar { ch, index });
        }
    }

    Ok(())
}

impl Display for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Handle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Handle {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}
