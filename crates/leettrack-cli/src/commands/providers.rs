use leettrack_core::{ProviderId, StatsAcquirer};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProvidersResponseData {
    attempt_timeout_ms: u64,
    providers: Vec<ProviderRow>,
}

#[derive(Debug, Serialize)]
struct ProviderRow {
    id: ProviderId,
    method: &'static str,
    target: String,
}

pub fn run(acquirer: &StatsAcquirer) -> Result<Value, CliError> {
    let providers = acquirer
        .adapters()
        .iter()
        .map(|adapter| ProviderRow {
            id: adapter.id(),
            method: adapter.method().as_str(),
            target: adapter.target_template(),
        })
        .collect();

    Ok(serde_json::to_value(ProvidersResponseData {
        attempt_timeout_ms: u64::try_from(acquirer.attempt_timeout().as_millis()).unwrap_or(u64::MAX),
        providers,
    })?)
}
