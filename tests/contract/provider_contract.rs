use std::sync::Arc;
use std::time::Duration;

use leettrack_core::{
    default_adapters, FailureClass, HttpMethod, ProviderAdapter, ProviderId, ScriptedHttpClient,
    StatsAcquirer,
};

/// One well-formed payload per provider, all describing the same account.
struct ProviderCase {
    id: ProviderId,
    url: &'static str,
    payload: &'static str,
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::Pied,
            url: "https://leetcode-api-pied.vercel.app/user/jdoe",
            payload: r#"{
                "profile": {"ranking": 81234},
                "submitStats": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": 150},
                        {"difficulty": "Easy", "count": 80},
                        {"difficulty": "Medium", "count": 60},
                        {"difficulty": "Hard", "count": 10}
                    ],
                    "totalSubmissionNum": [{"difficulty": "All", "count": 300}]
                }
            }"#,
        },
        ProviderCase {
            id: ProviderId::Restful,
            url: "https://leetcode-restful-api.vercel.app/profile",
            payload: r#"{
                "profile": {"ranking": "81234"},
                "submitStatsGlobal": {
                    "acSubmissionNum": [
                        {"difficulty": "All", "count": "150"},
                        {"difficulty": "Easy", "count": 80},
                        {"difficulty": "Medium", "count": 60},
                        {"difficulty": "Hard", "count": 10}
                    ],
                    "totalSubmissionNum": [{"difficulty": "All", "count": 300}]
                }
            }"#,
        },
        ProviderCase {
            id: ProviderId::Tashif,
            url: "https://tashif.codes/projects/leetcode-stats-api/jdoe",
            payload: r#"{
                "totalSolved": 150,
                "easySolved": 80,
                "mediumSolved": 60,
                "hardSolved": 10,
                "ranking": 81234,
                "acceptanceRate": 50.0
            }"#,
        },
    ]
}

fn single_provider(id: ProviderId, client: ScriptedHttpClient) -> StatsAcquirer {
    StatsAcquirer::new(
        vec![ProviderAdapter::for_provider(id)],
        Arc::new(client),
        Duration::from_secs(1),
    )
}

#[tokio::test]
async fn every_provider_normalizes_to_the_same_stats() {
    for case in provider_cases() {
        let acquirer =
            single_provider(case.id, ScriptedHttpClient::new().respond(case.url, 200, case.payload));

        let acquisition = acquirer
            .acquire("jdoe")
            .await
            .unwrap_or_else(|error| panic!("{} should map: {error}", case.id));

        assert_eq!(acquisition.provider, case.id);
        assert_eq!(acquisition.stats.total_solved, 150, "{}", case.id);
        assert_eq!(acquisition.stats.easy_solved, 80, "{}", case.id);
        assert_eq!(acquisition.stats.medium_solved, 60, "{}", case.id);
        assert_eq!(acquisition.stats.hard_solved, 10, "{}", case.id);
        assert_eq!(acquisition.stats.ranking, 81234, "{}", case.id);
        assert_eq!(acquisition.stats.acceptance_rate, 50.0, "{}", case.id);
    }
}

#[tokio::test]
async fn every_provider_reports_not_found_for_404() {
    for case in provider_cases() {
        let acquirer =
            single_provider(case.id, ScriptedHttpClient::new().respond(case.url, 404, "{}"));

        let error = acquirer.fetch("jdoe").await.expect_err("404 is a failure");

        assert_eq!(error.classification(), Some(FailureClass::NotFound), "{}", case.id);
        assert_eq!(error.attempted(), &[case.id]);
    }
}

#[tokio::test]
async fn every_provider_rejects_an_empty_object() {
    for case in provider_cases() {
        let acquirer =
            single_provider(case.id, ScriptedHttpClient::new().respond(case.url, 200, "{}"));

        let error = acquirer.fetch("jdoe").await.expect_err("no total solved");

        assert_eq!(error.classification(), Some(FailureClass::Unavailable), "{}", case.id);
        assert_eq!(error.failures()[0].reason.code(), "provider.invalid_stats");
    }
}

#[tokio::test]
async fn every_provider_rejects_a_payload_wrapped_in_an_array() {
    for case in provider_cases() {
        let wrapped = format!("[{}]", case.payload);
        let acquirer =
            single_provider(case.id, ScriptedHttpClient::new().respond(case.url, 200, wrapped));

        let error = acquirer.fetch("jdoe").await.expect_err("array is not a payload");

        assert_eq!(error.classification(), Some(FailureClass::Unavailable), "{}", case.id);
        assert_eq!(error.failures()[0].reason.code(), "provider.mapping", "{}", case.id);
    }
}

#[test]
fn request_shapes_match_each_provider() {
    let requests = default_adapters()
        .iter()
        .map(|adapter| adapter.build_request("jdoe", 10_000))
        .collect::<Vec<_>>();

    let cases = provider_cases();
    for (request, case) in requests.iter().zip(&cases) {
        assert_eq!(request.url, case.url);
    }

    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[1].method, HttpMethod::Post);
    assert_eq!(requests[1].body.as_deref(), Some(r#"{"username":"jdoe"}"#));
    assert_eq!(requests[2].method, HttpMethod::Get);
    assert!(requests[2].body.is_none());
}
