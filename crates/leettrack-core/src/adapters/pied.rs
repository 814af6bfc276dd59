//! `leetcode-api-pied`: GET `{base}/user/{handle}`.
//!
//! ```json
//! {
//!   "profile": { "ranking": 81234 },
//!   "submitStats": {
//!     "acSubmissionNum": [{ "difficulty": "All", "count": 150 }, ...],
//!     "totalSubmissionNum": [{ "difficulty": "All", "count": 300 }, ...]
//!   }
//! }
//! ```

use serde::Deserialize;

use crate::http_client::HttpMethod;
use crate::{ProviderId, StatsDraft};

use super::payload::{parse_json, Profile, SubmitStats};
use super::{MappingError, ProviderAdapter};

pub const DEFAULT_BASE_URL: &str = "https://leetcode-api-pied.vercel.app";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PiedUserResponse {
    #[serde(default)]
    submit_stats: Option<SubmitStats>,
    #[serde(default)]
    profile: Option<Profile>,
}

pub fn adapter() -> ProviderAdapter {
    ProviderAdapter {
        id: ProviderId::Pied,
        method: HttpMethod::Get,
        base_url: String::from(DEFAULT_BASE_URL),
        target,
        body: None,
        map: map_response,
    }
}

fn target(base_url: &str, handle: &str) -> String {
    format!("{base_url}/user/{handle}")
}

fn map_response(body: &str) -> Result<StatsDraft, MappingError> {
    let response: PiedUserResponse = parse_json(body)?;
    let ranking = response.profile.unwrap_or_default().ranking.or_zero();
    Ok(response.submit_stats.unwrap_or_default().into_draft(ranking))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bucketed_payload() {
        let draft = map_response(
            r#"{
                "username": "jdoe123",
                "profile": {"ranking": 81234},
                "submitStats": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": 150, "submissions": 290},
                        {"difficulty": "Easy", "count": 80},
                        {"difficulty": "Medium", "count": "55"},
                        {"difficulty": "Hard", "count": 15}
                    ],
                    "totalSubmissionNum": [
                        {"difficulty": "All", "count": 300}
                    ]
                }
            }"#,
        )
        .expect("payload should map");

        let stats = draft.validate().expect("valid stats");
        assert_eq!(stats.total_solved, 150);
        assert_eq!(stats.easy_solved, 80);
        assert_eq!(stats.medium_solved, 55);
        assert_eq!(stats.hard_solved, 15);
        assert_eq!(stats.ranking, 81234);
        assert_eq!(stats.acceptance_rate, 50.0);
    }

    #[test]
    fn missing_profile_defaults_ranking_to_zero() {
        let draft = map_response(
            r#"{"submitStats":{"acSubmissionNum":[{"difficulty":"All","count":4}]}}"#,
        )
        .expect("payload should map");

        assert_eq!(draft.total_solved, Some(4.0));
        assert_eq!(draft.ranking, 0);
        assert_eq!(draft.acceptance_rate, 0.0);
    }

    #[test]
    fn non_object_payload_is_a_mapping_failure() {
        let err = map_response("[]").expect_err("array is not a user payload");
        assert!(matches!(err, MappingError::UnexpectedShape(_)));

        let err = map_response("<html>rate limited</html>").expect_err("html is not json");
        assert!(matches!(err, MappingError::InvalidJson(_)));
    }
}
