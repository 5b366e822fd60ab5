//! Driven port asking the user to confirm a destructive action.

/// Yes/no question asked before a delete is sent.
#[cfg_attr(test, mockall::automock)]
pub trait DeleteConfirmation: Send + Sync {
    /// Return `true` when the user agrees to `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always agrees, for non-interactive use.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl DeleteConfirmation for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
