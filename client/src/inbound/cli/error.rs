//! Failures surfaced by a CLI command.

use thiserror::Error;

use crate::domain::{OperationFailure, SubmitError, UserValidationError};

/// Why a command did not complete. Any variant exits non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// A key or field value supplied on the command line was unusable.
    #[error("invalid input: {0}")]
    Input(#[from] UserValidationError),
    /// The form refused or failed its submit.
    #[error(transparent)]
    Submit(#[from] SubmitError),
    /// A list or delete call to the directory failed.
    #[error(transparent)]
    Operation(#[from] OperationFailure),
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    /// Records could not be rendered as JSON.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
