//! One-shot user-visible notices raised by the list view and forms.

use std::fmt;

use serde::Serialize;

use super::DirectoryOperation;

/// Question asked before a delete is sent.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this user?";

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Failure,
}

/// A message shown to the user once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    level: NoticeLevel,
    message: String,
}

impl Notice {
    /// Build a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Build a failure notice.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }

    /// Success notice for a completed mutation.
    ///
    /// Fetches never raise success notices, so `None` is returned for them.
    pub fn completed(operation: DirectoryOperation) -> Option<Self> {
        let message = match operation {
            DirectoryOperation::Fetch => return None,
            DirectoryOperation::Create => "User added successfully!",
            DirectoryOperation::Update => "User updated successfully!",
            DirectoryOperation::Delete => "User and its reviews deleted successfully.",
        };
        Some(Self::success(message))
    }

    /// Failure notice for an operation whose remote call failed.
    pub fn failed(operation: DirectoryOperation) -> Self {
        Self::failure(match operation {
            DirectoryOperation::Fetch => "Failed to load users.",
            DirectoryOperation::Create => "Failed to add user. Please try again.",
            DirectoryOperation::Update => "Failed to update user.",
            DirectoryOperation::Delete => "Failed to delete user.",
        })
    }

    /// Success or failure.
    pub fn level(&self) -> NoticeLevel {
        self.level
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
