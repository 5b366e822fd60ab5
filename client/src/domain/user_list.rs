//! In-memory cache backing the list view.
//!
//! The cache is filled by one list call when the view opens and is then
//! mutated locally after deletes. It is never reconciled with the service
//! unless [`UserListCache::refresh`] is called again.

use std::sync::Arc;

use tracing::{debug, error};

use super::ports::{DeleteConfirmation, DirectoryService, Notifier};
use super::{
    DELETE_CONFIRMATION_PROMPT, DirectoryOperation, Notice, OperationFailure, UserKey, UserRecord,
    filter_by_first_name,
};

/// Whether the first list load has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    /// The first load has not completed yet.
    Loading,
    /// At least one load attempt has completed, successfully or not.
    Ready,
}

/// Result of a delete request from the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// The service deleted the record. `removed` is the record dropped from
    /// the local cache, if one was cached.
    Deleted { removed: Option<UserRecord> },
}

/// Ordered user records held for the lifetime of a list view.
pub struct UserListCache<S: ?Sized, N: ?Sized> {
    service: Arc<S>,
    notifier: Arc<N>,
    records: Vec<UserRecord>,
    state: ListState,
    query: String,
}

impl<S, N> UserListCache<S, N>
where
    S: DirectoryService + ?Sized,
    N: Notifier + ?Sized,
{
    /// Build an empty cache in the loading state without calling the service.
    pub fn new(service: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            service,
            notifier,
            records: Vec::new(),
            state: ListState::Loading,
            query: String::new(),
        }
    }

    /// Build a cache and issue its initial list call.
    ///
    /// A failed load is logged and leaves the cache empty; the view still
    /// leaves the loading state.
    pub async fn load(service: Arc<S>, notifier: Arc<N>) -> Self {
        let mut cache = Self::new(service, notifier);
        if cache.refresh().await.is_err() {
            debug!("list view opened without records");
        }
        cache
    }

    /// Replace the cache with a fresh list from the service.
    ///
    /// On failure the previously cached records are kept and the error is
    /// returned after logging.
    pub async fn refresh(&mut self) -> Result<usize, OperationFailure> {
        let result = self.service.list_users().await;
        self.state = ListState::Ready;
        match result {
            Ok(records) => {
                debug!(count = records.len(), "user list loaded");
                self.records = records;
                Ok(self.records.len())
            }
            Err(source) => {
                error!(error = %source, "error fetching users");
                Err(OperationFailure::new(DirectoryOperation::Fetch, source))
            }
        }
    }

    /// Every cached record, in service order.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Current load state.
    pub fn state(&self) -> ListState {
        self.state
    }

    /// Whether the first load is still pending.
    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Set the search box text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Current search box text.
    pub fn search(&self) -> &str {
        self.query.as_str()
    }

    /// Records matching the current search, in cache order.
    pub fn visible(&self) -> Vec<UserRecord> {
        filter_by_first_name(&self.records, &self.query)
    }

    /// Drop the first cached record addressed by `key`.
    ///
    /// Local only: the service is not called and the list is not re-fetched.
    pub fn remove(&mut self, key: &UserKey) -> Option<UserRecord> {
        let index = self
            .records
            .iter()
            .position(|record| record.is_addressed_by(key))?;
        Some(self.records.remove(index))
    }

    /// Confirm, delete remotely, then remove locally.
    ///
    /// The local cache is only touched after the service reports success. A
    /// failure raises a notice, is logged and leaves the cache unchanged.
    pub async fn delete(
        &mut self,
        key: &UserKey,
        confirmation: &dyn DeleteConfirmation,
    ) -> Result<DeleteOutcome, OperationFailure> {
        if !confirmation.confirm(DELETE_CONFIRMATION_PROMPT) {
            debug!(user = %key, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        match self.service.delete_user(key).await {
            Ok(()) => {
                let removed = self.remove(key);
                if let Some(notice) = Notice::completed(DirectoryOperation::Delete) {
                    self.notifier.notify(notice);
                }
                Ok(DeleteOutcome::Deleted { removed })
            }
            Err(source) => {
                error!(user = %key, error = %source, "error deleting user");
                self.notifier
                    .notify(Notice::failed(DirectoryOperation::Delete));
                Err(OperationFailure::new(DirectoryOperation::Delete, source))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_list_tests.rs"]
mod tests;
