//! Domain primitives, controllers and ports.
//!
//! Purpose: hold the user directory's page logic independent of how it is
//! driven (terminal, tests) and of how the remote directory is reached.
//!
//! Public surface:
//! - UserRecord / UserKey: the user entity and its addressing key.
//! - filter_by_first_name: search filter for the list view.
//! - UserListCache: list view cache with optimistic delete.
//! - UserForm: create and edit form controllers.
//! - Route, Notice: navigation targets and one-shot notices.

pub mod error;
pub mod navigation;
pub mod notice;
pub mod ports;
pub mod search;
pub mod user;
pub mod user_form;
pub mod user_list;

pub use self::error::{DirectoryOperation, OperationFailure};
pub use self::navigation::Route;
pub use self::notice::{DELETE_CONFIRMATION_PROMPT, Notice, NoticeLevel};
pub use self::search::filter_by_first_name;
pub use self::user::{UserKey, UserRecord, UserValidationError};
pub use self::user_form::{FormField, FormMode, FormState, SubmitError, UserForm, UserFormFields};
pub use self::user_list::{DeleteOutcome, ListState, UserListCache};
