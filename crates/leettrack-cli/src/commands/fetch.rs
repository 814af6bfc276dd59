use leettrack_core::{Acquisition, Handle, NormalizedStats, ProviderFailure, ProviderId, StatsAcquirer};
use serde::Serialize;
use serde_json::Value;

use crate::cli::FetchArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchResponseData {
    handle: String,
    stats: NormalizedStats,
    selected_provider: ProviderId,
    attempted: Vec<ProviderId>,
    failures: Vec<FailureData>,
    latency_ms: u64,
}

#[derive(Debug, Serialize)]
struct FailureData {
    provider: ProviderId,
    code: &'static str,
    message: String,
}

impl From<&ProviderFailure> for FailureData {
    fn from(failure: &ProviderFailure) -> Self {
        Self {
            provider: failure.provider,
            code: failure.reason.code(),
            message: failure.reason.to_string(),
        }
    }
}

pub async fn run(args: &FetchArgs, acquirer: &StatsAcquirer) -> Result<Value, CliError> {
    let handle = Handle::parse(&args.input)?;
    let acquisition = acquirer.acquire(handle.as_str()).await?;
    Ok(serde_json::to_value(response_data(handle, acquisition))?)
}

fn response_data(handle: Handle, acquisition: Acquisition) -> FetchResponseData {
    FetchResponseData {
        handle: handle.into(),
        stats: acquisition.stats,
        selected_provider: acquisition.provider,
        attempted: acquisition.attempted,
        failures: acquisition.failures.iter().map(FailureData::from).collect(),
        latency_ms: acquisition.latency_ms,
    }
}
