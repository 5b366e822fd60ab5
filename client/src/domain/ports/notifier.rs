//! Driven port for presenting one-shot notices to the user.

use std::sync::{Mutex, PoisonError};

use crate::domain::Notice;

/// Port receiving notices raised by the list view and forms.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Present `notice` once.
    fn notify(&self, notice: Notice);
}

/// Notifier that keeps every notice in memory, oldest first.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
