//! CLI argument definitions for leettrack.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Fetch stats for a handle or profile url |
//! | `parse` | Extract the handle from a profile url |
//! | `providers` | Show the configured provider chain |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-provider timeout in ms |
//! | `--provider` | all | Provider to try, repeatable, in order |
//! | `--log-level` | `warn` | Log filter when `RUST_LOG` is unset |
//!
//! # Examples
//!
//! ```bash
//! leettrack fetch https://leetcode.com/u/jdoe/ --pretty
//! leettrack fetch jdoe --provider tashif --provider pied
//! leettrack parse "leetcode.com/jdoe?tab=submissions"
//! ```

use clap::{Args, Parser, Subcommand};
use leettrack_core::ProviderId;

/// LeetCode stats from whichever public provider answers first.
#[derive(Debug, Parser)]
#[command(name = "leettrack", author, version, about)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-provider timeout in milliseconds.
    ///
    /// Overrides LEETTRACK_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Provider to try (pied, restful, tashif). Repeat to set the order.
    ///
    /// Overrides LEETTRACK_PROVIDERS.
    #[arg(long = "provider", global = true, value_parser = parse_provider)]
    pub providers: Vec<ProviderId>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch normalized stats, falling back across providers.
    ///
    /// # Examples
    ///
    ///   leettrack fetch jdoe
    ///   leettrack fetch https://leetcode.com/u/jdoe/ --pretty
    Fetch(FetchArgs),

    /// Extract and validate the handle from a handle or profile url.
    Parse(ParseArgs),

    /// Show the provider chain in the order it will be tried.
    Providers,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Handle or LeetCode profile url.
    pub input: String,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Handle or LeetCode profile url.
    pub input: String,
}

fn parse_provider(value: &str) -> Result<ProviderId, String> {
    value.parse::<ProviderId>().map_err(|error| error.to_string())
}
