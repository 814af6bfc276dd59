use std::io::Write;

use leettrack_core::AcquisitionError;
use serde_json::Value;

use crate::error::CliError;

pub fn render(value: &Value, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Writes the error and, for an exhausted chain, one line per provider.
pub fn render_error(error: &CliError) {
    eprintln!("error: {error}");
    if let CliError::Acquisition(AcquisitionError::Exhausted { failures, .. }) = error {
        for failure in failures {
            eprintln!("  {failure}");
        }
    }
}
