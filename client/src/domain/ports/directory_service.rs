//! Driven port for the Remote Directory Service.
//!
//! The domain owns the request and response contract so the list cache and
//! form controllers stay transport-agnostic.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{UserKey, UserRecord};

define_port_error! {
    /// Errors surfaced while calling the remote directory.
    pub enum DirectoryServiceError {
        /// Network transport failed or the service answered with a server error.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// The call exceeded the client or gateway timeout.
        Timeout { message: String } =>
            "directory call timed out: {message}",
        /// No record is addressed by the requested key.
        NotFound { message: String } =>
            "directory record not found: {message}",
        /// The service refused the request as invalid.
        Rejected { message: String } =>
            "directory rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "directory response decode failed: {message}",
    }
}

/// Port for reading and mutating user records held by the remote directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch every record, in the order the service returns them.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use user_directory::domain::ports::{DirectoryService, FixtureDirectoryService};
    ///
    /// let service = FixtureDirectoryService::default();
    /// let users = service.list_users().await?;
    /// assert!(users.is_empty());
    /// # Ok::<(), user_directory::domain::ports::DirectoryServiceError>(())
    /// ```
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryServiceError>;

    /// Create a record from the full field set.
    async fn create_user(&self, user: &UserRecord) -> Result<(), DirectoryServiceError>;

    /// Replace every field of the record addressed by `key`.
    async fn update_user(
        &self,
        key: &UserKey,
        user: &UserRecord,
    ) -> Result<(), DirectoryServiceError>;

    /// Delete the record addressed by `key`.
    async fn delete_user(&self, key: &UserKey) -> Result<(), DirectoryServiceError>;
}

/// In-memory directory used by tests and offline demos.
///
/// Update and delete act on the first record addressed by the key, the same
/// way the remote service resolves first names.
#[derive(Debug, Default)]
pub struct FixtureDirectoryService {
    records: Mutex<Vec<UserRecord>>,
}

impl FixtureDirectoryService {
    /// Seed the directory with `records`.
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Snapshot of the records currently held.
    pub fn records(&self) -> Vec<UserRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_addressed<T>(
        &self,
        key: &UserKey,
        apply: impl FnOnce(&mut Vec<UserRecord>, usize) -> T,
    ) -> Result<T, DirectoryServiceError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let index = records
            .iter()
            .position(|record| record.is_addressed_by(key))
            .ok_or_else(|| DirectoryServiceError::not_found(format!("no user named {key}")))?;
        Ok(apply(&mut records, index))
    }
}

#[async_trait]
impl DirectoryService for FixtureDirectoryService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryServiceError> {
        Ok(self.records())
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), DirectoryServiceError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(user.clone());
        Ok(())
    }

    async fn update_user(
        &self,
        key: &UserKey,
        user: &UserRecord,
    ) -> Result<(), DirectoryServiceError> {
        self.with_addressed(key, |records, index| {
            if let Some(slot) = records.get_mut(index) {
                *slot = user.clone();
            }
        })
    }

    async fn delete_user(&self, key: &UserKey) -> Result<(), DirectoryServiceError> {
        self.with_addressed(key, |records, index| {
            records.remove(index);
        })
    }
}
