//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod confirmation;
mod directory_service;
mod notifier;

#[cfg(test)]
pub use confirmation::MockDeleteConfirmation;
pub use confirmation::{AlwaysConfirm, DeleteConfirmation};
#[cfg(test)]
pub use directory_service::MockDirectoryService;
pub use directory_service::{DirectoryService, DirectoryServiceError, FixtureDirectoryService};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notifier, RecordingNotifier};
