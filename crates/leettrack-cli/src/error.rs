use leettrack_core::{AcquisitionError, FailureClass};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] leettrack_core::ValidationError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Acquisition(error) => match error.classification() {
                None => 2,
                Some(FailureClass::NotFound) => 3,
                Some(FailureClass::Unavailable) => 4,
            },
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
