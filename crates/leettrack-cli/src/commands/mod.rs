mod fetch;
mod parse;
mod providers;

use std::time::Duration;

use leettrack_core::{StatsAcquirer, StatsAcquirerBuilder};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    match &cli.command {
        Command::Fetch(args) => fetch::run(args, &build_acquirer(cli)?).await,
        Command::Parse(args) => parse::run(args),
        Command::Providers => providers::run(&build_acquirer(cli)?),
    }
}

/// Environment settings first, then command-line overrides.
fn build_acquirer(cli: &Cli) -> Result<StatsAcquirer, CliError> {
    let mut builder = StatsAcquirerBuilder::new().with_env()?;

    if let Some(timeout_ms) = cli.timeout_ms {
        builder = builder.with_attempt_timeout(Duration::from_millis(timeout_ms));
    }
    if !cli.providers.is_empty() {
        builder = builder.with_providers(cli.providers.clone());
    }

    Ok(builder.build()?)
}
