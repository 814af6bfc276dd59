//! `leetcode-restful-api`: POST `{base}/profile` with `{"username": handle}`.
//!
//! Same bucket shape as the pied provider, nested under `submitStatsGlobal`.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::http_client::HttpMethod;
use crate::{ProviderId, StatsDraft};

use super::payload::{parse_json, Profile, SubmitStats};
use super::{MappingError, ProviderAdapter};

pub const DEFAULT_BASE_URL: &str = "https://leetcode-restful-api.vercel.app";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestfulProfileResponse {
    #[serde(default)]
    submit_stats_global: Option<SubmitStats>,
    #[serde(default)]
    profile: Option<Profile>,
}

pub fn adapter() -> ProviderAdapter {
    ProviderAdapter {
        id: ProviderId::Restful,
        method: HttpMethod::Post,
        base_url: String::from(DEFAULT_BASE_URL),
        target,
        body: Some(body),
        map: map_response,
    }
}

fn target(base_url: &str, _handle: &str) -> String {
    format!("{base_url}/profile")
}

fn body(handle: &str) -> Value {
    json!({ "username": handle })
}

fn map_response(body: &str) -> Result<StatsDraft, MappingError> {
    let response: RestfulProfileResponse = parse_json(body)?;
    let ranking = response.profile.unwrap_or_default().ranking.or_zero();
    Ok(response
        .submit_stats_global
        .unwrap_or_default()
        .into_draft(ranking))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_raw_handle() {
        assert_eq!(body("JDoe_1"), json!({ "username": "JDoe_1" }));
        assert_eq!(target("https://r.test", "JDoe_1"), "https://r.test/profile");
    }

    #[test]
    fn maps_global_submit_stats() {
        let draft = map_response(
            r#"{
                "profile": {"ranking": "1200"},
                "submitStatsGlobal": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": 3},
                        {"difficulty": "Easy", "count": 2},
                        {"difficulty": "Hard", "count": 1}
                    ],
                    "totalSubmissionNum": [{"difficulty": "All", "count": 9}]
                }
            }"#,
        )
        .expect("payload should map");

        let stats = draft.validate().expect("valid stats");
        assert_eq!(stats.total_solved, 3);
        assert_eq!(stats.medium_solved, 0);
        assert_eq!(stats.ranking, 1200);
        assert_eq!(stats.acceptance_rate, 33.33);
    }

    #[test]
    fn pied_shape_is_not_accepted() {
        let draft = map_response(
            r#"{"submitStats":{"acSubmissionNum":[{"difficulty":"All","count":3}]}}"#,
        )
        .expect("still a json object");
        assert!(draft.validate().is_err());
    }

    #[test]
    fn array_payload_is_a_mapping_failure() {
        let err = map_response(
            r#"[{"submitStatsGlobal":{"acSubmissionNum":[{"difficulty":"All","count":3}]}}]"#,
        )
        .expect_err("array is not a profile payload");
        assert!(matches!(err, MappingError::UnexpectedShape(_)));
    }
}
