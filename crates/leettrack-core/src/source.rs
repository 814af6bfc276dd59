use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical identifiers of the third-party stats providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    #[serde(rename = "leetcode-api-pied")]
    Pied,
    #[serde(rename = "leetcode-restful-api")]
    Restful,
    #[serde(rename = "tashif-api")]
    Tashif,
}

impl ProviderId {
    /// Default fallback order.
    pub const ALL: [Self; 3] = [Self::Pied, Self::Restful, Self::Tashif];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pied => "leetcode-api-pied",
            Self::Restful => "leetcode-restful-api",
            Self::Tashif => "tashif-api",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "leetcode-api-pied" | "pied" => Ok(Self::Pied),
            "leetcode-restful-api" | "restful" => Ok(Self::Restful),
            "tashif-api" | "tashif" => Ok(Self::Tashif),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}
