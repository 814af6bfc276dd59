//! `tashif-api`: GET `{base}/{handle}`, flat payload that already carries
//! the acceptance rate.

use serde::Deserialize;

use crate::http_client::HttpMethod;
use crate::{ProviderId, StatsDraft};

use super::payload::{parse_json, Count};
use super::{MappingError, ProviderAdapter};

pub const DEFAULT_BASE_URL: &str = "https://tashif.codes/projects/leetcode-stats-api";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TashifStatsResponse {
    #[serde(default)]
    total_solved: Count,
    #[serde(default)]
    easy_solved: Count,
    #[serde(default)]
    medium_solved: Count,
    #[serde(default)]
    hard_solved: Count,
    #[serde(default)]
    ranking: Count,
    #[serde(default)]
    acceptance_rate: Count,
}

pub fn adapter() -> ProviderAdapter {
    ProviderAdapter {
        id: ProviderId::Tashif,
        method: HttpMethod::Get,
        base_url: String::from(DEFAULT_BASE_URL),
        target,
        body: None,
        map: map_response,
    }
}

fn target(base_url: &str, handle: &str) -> String {
    format!("{base_url}/{handle}")
}

fn map_response(body: &str) -> Result<StatsDraft, MappingError> {
    let response: TashifStatsResponse = parse_json(body)?;
    Ok(StatsDraft {
        total_solved: response.total_solved.value(),
        easy_solved: response.easy_solved.or_zero(),
        medium_solved: response.medium_solved.or_zero(),
        hard_solved: response.hard_solved.or_zero(),
        ranking: response.ranking.or_zero(),
        // clamped and rounded by validation
        acceptance_rate: response.acceptance_rate.value().unwrap_or(0.0),
    })
}
