use leettrack_core::Handle;
use serde::Serialize;
use serde_json::Value;

use crate::cli::ParseArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ParseResponseData<'a> {
    input: &'a str,
    handle: Handle,
    key: String,
}

pub fn run(args: &ParseArgs) -> Result<Value, CliError> {
    let handle = Handle::parse(&args.input)?;
    let key = handle.key();
    Ok(serde_json::to_value(ParseResponseData {
        input: &args.input,
        handle,
        key,
    })?)
}
