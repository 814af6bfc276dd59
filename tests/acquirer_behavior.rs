//! Behavior-driven tests for the provider fallback chain
//!
//! These tests verify WHAT a caller observes when providers succeed, fail,
//! stall or disagree, using a scripted offline transport.

use std::sync::Arc;
use std::time::Duration;

use leettrack_core::{FailureClass, HttpError, ProviderId, ScriptedHttpClient, StatsAcquirer};

const PIED: &str = "http://pied.test/user/jdoe";
const RESTFUL: &str = "http://restful.test/profile";
const TASHIF: &str = "http://tashif.test/jdoe";

const PIED_OK: &str = r#"{
    "profile": {"ranking": 500},
    "submitStats": {
        "acSubmissionNum": [
            {"difficulty": "All", "count": 42},
            {"difficulty": "Easy", "count": 30},
            {"difficulty": "Medium", "count": 10},
            {"difficulty": "Hard", "count": 2}
        ],
        "totalSubmissionNum": [{"difficulty": "All", "count": 84}]
    }
}"#;

const RESTFUL_OK: &str = r#"{
    "submitStatsGlobal": {
        "acSubmissionNum": [{"difficulty": "All", "count": 7}],
        "totalSubmissionNum": [{"difficulty": "All", "count": 21}]
    }
}"#;

const TASHIF_OK: &str = r#"{"totalSolved": 99, "acceptanceRate": 123.456}"#;

fn acquirer_with(
    client: ScriptedHttpClient,
    timeout: Duration,
) -> (StatsAcquirer, Arc<ScriptedHttpClient>) {
    let client = Arc::new(client);
    let acquirer = StatsAcquirer::builder()
        .with_base_url(ProviderId::Pied, "http://pied.test")
        .with_base_url(ProviderId::Restful, "http://restful.test")
        .with_base_url(ProviderId::Tashif, "http://tashif.test")
        .with_attempt_timeout(timeout)
        .with_http_client(client.clone())
        .build()
        .expect("valid acquirer");
    (acquirer, client)
}

fn acquirer(client: ScriptedHttpClient) -> (StatsAcquirer, Arc<ScriptedHttpClient>) {
    acquirer_with(client, Duration::from_secs(2))
}

// =============================================================================
// Fallback: first success wins
// =============================================================================

#[tokio::test]
async fn when_first_provider_answers_later_providers_are_never_called() {
    // Given: Every provider would answer
    let (acquirer, client) = acquirer(
        ScriptedHttpClient::new()
            .respond(PIED, 200, PIED_OK)
            .respond(RESTFUL, 200, RESTFUL_OK)
            .respond(TASHIF, 200, TASHIF_OK),
    );

    // When: The caller fetches stats
    let stats = acquirer.fetch("jdoe").await.expect("pied answers");

    // Then: The first provider's data is returned
    assert_eq!(stats.total_solved, 42);
    assert_eq!(stats.easy_solved, 30);
    assert_eq!(stats.ranking, 500);
    assert_eq!(stats.acceptance_rate, 50.0);

    // And: Exactly one outbound call was made
    assert_eq!(client.called_urls(), vec![PIED]);
}

#[tokio::test]
async fn when_earlier_providers_fail_the_first_valid_later_answer_is_used() {
    // Given: pied is down and restful answers
    let (acquirer, client) = acquirer(
        ScriptedHttpClient::new()
            .respond(PIED, 500, "internal error")
            .respond(RESTFUL, 200, RESTFUL_OK)
            .respond(TASHIF, 200, TASHIF_OK),
    );

    // When: The caller acquires stats
    let acquisition = acquirer.acquire("jdoe").await.expect("restful answers");

    // Then: restful's data is returned with its acceptance rate
    assert_eq!(acquisition.provider, ProviderId::Restful);
    assert_eq!(acquisition.stats.total_solved, 7);
    assert_eq!(acquisition.stats.acceptance_rate, 33.33);

    // And: The diagnostics show what was skipped
    assert_eq!(acquisition.attempted, vec![ProviderId::Pied, ProviderId::Restful]);
    assert_eq!(acquisition.failures.len(), 1);
    assert_eq!(acquisition.failures[0].provider, ProviderId::Pied);
    assert_eq!(client.called_urls(), vec![PIED, RESTFUL]);
}

#[tokio::test]
async fn when_a_payload_lacks_the_all_bucket_the_next_provider_is_tried() {
    // Given: pied answers 200 but with only per-difficulty buckets
    let (acquirer, _client) = acquirer(
        ScriptedHttpClient::new()
            .respond(
                PIED,
                200,
                r#"{"submitStats":{"acSubmissionNum":[{"difficulty":"Easy","count":5}]}}"#,
            )
            .respond(RESTFUL, 200, RESTFUL_OK),
    );

    // When: The caller acquires stats
    let acquisition = acquirer.acquire("jdoe").await.expect("restful answers");

    // Then: The total is not summed from tiers; restful wins instead
    assert_eq!(acquisition.provider, ProviderId::Restful);
    assert_eq!(acquisition.failures[0].reason.code(), "provider.invalid_stats");
}

#[tokio::test]
async fn when_flat_provider_overreports_acceptance_it_is_clamped() {
    // Given: Only tashif is reachable and reports more than 100%
    let (acquirer, _client) = acquirer(
        ScriptedHttpClient::new()
            .respond(PIED, 503, "")
            .respond(RESTFUL, 503, "")
            .respond(TASHIF, 200, TASHIF_OK),
    );

    // When: The caller fetches stats
    let stats = acquirer.fetch("jdoe").await.expect("tashif answers");

    // Then: The rate stays within bounds
    assert_eq!(stats.total_solved, 99);
    assert_eq!(stats.acceptance_rate, 100.0);
}

#[tokio::test]
async fn zero_solved_is_a_valid_answer() {
    // Given: A fresh account with nothing solved
    let (acquirer, client) = acquirer(
        ScriptedHttpClient::new().respond(
            PIED,
            200,
            r#"{"submitStats":{"acSubmissionNum":[{"difficulty":"All","count":0}]}}"#,
        ),
    );

    // When: The caller fetches stats
    let stats = acquirer.fetch("jdoe").await.expect("zero is valid");

    // Then: Zero is returned without falling through
    assert_eq!(stats.total_solved, 0);
    assert_eq!(stats.acceptance_rate, 0.0);
    assert_eq!(client.calls().len(), 1);
}

// =============================================================================
// Timeouts
// =============================================================================

#[tokio::test]
async fn when_a_provider_stalls_the_attempt_times_out_and_fallback_continues() {
    // Given: pied takes longer than the per-attempt budget
    let (acquirer, client) = acquirer_with(
        ScriptedHttpClient::new()
            .delay(PIED, Duration::from_secs(5), 200, PIED_OK)
            .respond(RESTFUL, 200, RESTFUL_OK),
        Duration::from_millis(50),
    );

    // When: The caller acquires stats
    let acquisition = acquirer.acquire("jdoe").await.expect("restful answers");

    // Then: pied is recorded as a timeout and restful's data is used
    assert_eq!(acquisition.provider, ProviderId::Restful);
    assert_eq!(acquisition.attempted, vec![ProviderId::Pied, ProviderId::Restful]);
    assert_eq!(acquisition.failures[0].reason.code(), "provider.timeout");
    assert!(acquisition.latency_ms < 5_000);
    assert_eq!(client.called_urls(), vec![PIED, RESTFUL]);
}

// =============================================================================
// Exhaustion and classification
// =============================================================================

#[tokio::test]
async fn when_all_providers_are_down_the_error_is_unavailable() {
    // Given: Every provider fails without a 404
    let (acquirer, client) = acquirer(
        ScriptedHttpClient::new()
            .respond(PIED, 502, "")
            .fail(RESTFUL, HttpError::connect("connection refused"))
            .respond(TASHIF, 200, "<html>maintenance</html>"),
    );

    // When: The caller fetches stats
    let error = acquirer.fetch("jdoe").await.expect_err("nothing answers");

    // Then: The failure is classified as unavailable
    assert_eq!(error.classification(), Some(FailureClass::Unavailable));

    // And: Every provider is named in order
    assert_eq!(
        error.attempted(),
        &[ProviderId::Pied, ProviderId::Restful, ProviderId::Tashif]
    );
    let message = error.to_string();
    assert!(message.contains("leetcode-api-pied, leetcode-restful-api, tashif-api"));
    assert_eq!(client.calls().len(), 3);
}

#[tokio::test]
async fn when_any_provider_says_404_the_error_is_not_found() {
    // Given: One provider denies the account and the others are down
    let (acquirer, _client) = acquirer(
        ScriptedHttpClient::new()
            .respond(PIED, 503, "")
            .respond(RESTFUL, 404, r#"{"error":"user not found"}"#)
            .fail(TASHIF, HttpError::timeout("deadline")),
    );

    // When: The caller fetches stats
    let error = acquirer.fetch("ghost").await.expect_err("nothing answers");

    // Then: The account is reported missing
    assert!(error.is_not_found());
    assert!(error.to_string().contains("'ghost' not found"));
    assert_eq!(error.failures().len(), 3);
}

#[tokio::test]
async fn blank_identifier_fails_before_any_provider_is_called() {
    // Given: A caller passes whitespace
    let (acquirer, client) = acquirer(ScriptedHttpClient::new().respond(PIED, 200, PIED_OK));

    // When: They fetch
    let error = acquirer.fetch("   ").await.expect_err("blank identifier");

    // Then: No provider is attempted
    assert_eq!(error.classification(), None);
    assert!(client.calls().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn concurrent_fetches_share_configuration_independently() {
    // Given: One acquirer shared by several tasks
    let (acquirer, client) = acquirer(ScriptedHttpClient::new().respond(PIED, 200, PIED_OK));

    // When: Several fetches run at once
    let handles = (0..4)
        .map(|_| {
            let acquirer = acquirer.clone();
            tokio::spawn(async move { acquirer.fetch("jdoe").await })
        })
        .collect::<Vec<_>>();

    // Then: Each gets the same answer and makes its own single call
    for handle in handles {
        let stats = handle.await.expect("task joins").expect("pied answers");
        assert_eq!(stats.total_solved, 42);
    }
    assert_eq!(client.calls().len(), 4);
}
