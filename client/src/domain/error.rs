//! Failure taxonomy for remote directory operations.
//!
//! Every failure is terminal for the action that triggered it: nothing is
//! retried and local state is left as it was before the call.

use std::fmt;

use thiserror::Error;

use super::ports::DirectoryServiceError;

/// The remote call a component was making when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryOperation {
    /// Initial or repeated list load.
    Fetch,
    /// Create form submission.
    Create,
    /// Edit form submission.
    Update,
    /// List view delete.
    Delete,
}

impl DirectoryOperation {
    /// Short label used in logs and error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "fetch users",
            Self::Create => "create user",
            Self::Update => "update user",
            Self::Delete => "delete user",
        }
    }
}

impl fmt::Display for DirectoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A remote call failure tagged with the operation that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {source}")]
pub struct OperationFailure {
    operation: DirectoryOperation,
    #[source]
    source: DirectoryServiceError,
}

impl OperationFailure {
    /// Tag `source` with `operation`.
    pub fn new(operation: DirectoryOperation, source: DirectoryServiceError) -> Self {
        Self { operation, source }
    }

    /// Operation that failed.
    pub fn operation(&self) -> DirectoryOperation {
        self.operation
    }

    /// Underlying port error.
    pub fn cause(&self) -> &DirectoryServiceError {
        &self.source
    }
}
