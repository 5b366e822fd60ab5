//! Create and edit form controllers.
//!
//! A form owns its field state and a busy flag. Submitting validates the
//! fields, sends the full record to the directory and, on success, returns
//! the route to navigate to. Fields are never partially written: a failed
//! submit leaves them exactly as they were so the user can retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, error, warn};

use super::ports::{DirectoryService, DirectoryServiceError, Notifier};
use super::{
    DirectoryOperation, Notice, OperationFailure, Route, UserKey, UserRecord, UserValidationError,
};

/// Editable field state for one form instance.
///
/// Plain data with no state surviving past the controller that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFormFields {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub age: u32,
    pub marital_status: String,
    pub is_employed: bool,
    pub is_founder: bool,
}

/// Individual inputs of the user form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    UserName,
    Age,
    MaritalStatus,
    IsEmployed,
    IsFounder,
}

impl UserFormFields {
    /// Fields initialised from an existing record.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            user_name: record.username.clone(),
            age: record.age,
            marital_status: record.marital_status.clone(),
            is_employed: record.is_employed,
            is_founder: record.is_founder,
        }
    }

    /// Build the record a submit would send, enforcing required fields.
    pub fn to_record(&self) -> Result<UserRecord, UserValidationError> {
        let record = UserRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.user_name.clone(),
            age: self.age,
            marital_status: self.marital_status.clone(),
            is_employed: self.is_employed,
            is_founder: self.is_founder,
        };
        record.validate()?;
        Ok(record)
    }

    /// Apply raw text typed into `field`.
    ///
    /// Flags are `true` only for the literal text `true`. Age must parse as a
    /// non-negative whole number; on error the field keeps its value.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::{FormField, UserFormFields};
    ///
    /// let mut fields = UserFormFields::default();
    /// fields.apply_input(FormField::Age, "30").expect("numeric age");
    /// fields.apply_input(FormField::IsEmployed, "true").expect("flag");
    /// fields.apply_input(FormField::IsFounder, "yes").expect("flag");
    /// assert_eq!(fields.age, 30);
    /// assert!(fields.is_employed);
    /// assert!(!fields.is_founder);
    /// ```
    pub fn apply_input(&mut self, field: FormField, raw: &str) -> Result<(), UserValidationError> {
        match field {
            FormField::FirstName => self.first_name = raw.to_owned(),
            FormField::LastName => self.last_name = raw.to_owned(),
            FormField::UserName => self.user_name = raw.to_owned(),
            FormField::MaritalStatus => self.marital_status = raw.to_owned(),
            FormField::Age => {
                self.age = raw
                    .trim()
                    .parse()
                    .map_err(|_| UserValidationError::InvalidAge {
                        input: raw.to_owned(),
                    })?;
            }
            FormField::IsEmployed => self.is_employed = raw == "true",
            FormField::IsFounder => self.is_founder = raw == "true",
        }
        Ok(())
    }
}

/// What a form's submit sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// POST a new record.
    Create,
    /// PUT over the record addressed by the key.
    Edit(UserKey),
}

impl FormMode {
    fn operation(&self) -> DirectoryOperation {
        match self {
            Self::Create => DirectoryOperation::Create,
            Self::Edit(_) => DirectoryOperation::Update,
        }
    }
}

/// Submission state of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
}

/// Reasons a submit did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Another submit on the same form is still in flight; nothing was sent.
    #[error("a submission is already in progress")]
    Busy,
    /// The fields failed validation; nothing was sent.
    #[error("form input is invalid: {0}")]
    Invalid(#[from] UserValidationError),
    /// The directory rejected or failed the request.
    #[error(transparent)]
    Failed(#[from] OperationFailure),
}

/// Releases the busy flag when dropped, including when a submit future is
/// abandoned mid-flight.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Form controller shared by the create and edit pages.
pub struct UserForm<S: ?Sized, N: ?Sized> {
    service: Arc<S>,
    notifier: Arc<N>,
    mode: FormMode,
    fields: Mutex<UserFormFields>,
    busy: AtomicBool,
}

impl<S, N> UserForm<S, N>
where
    S: DirectoryService + ?Sized,
    N: Notifier + ?Sized,
{
    fn with_fields(
        service: Arc<S>,
        notifier: Arc<N>,
        mode: FormMode,
        fields: UserFormFields,
    ) -> Self {
        Self {
            service,
            notifier,
            mode,
            fields: Mutex::new(fields),
            busy: AtomicBool::new(false),
        }
    }

    /// Empty create form.
    pub fn create(service: Arc<S>, notifier: Arc<N>) -> Self {
        Self::with_fields(service, notifier, FormMode::Create, UserFormFields::default())
    }

    /// Edit form for `key` starting from empty fields.
    ///
    /// Submitting untouched fields overwrites the record with blanks, which
    /// validation then rejects. Use [`UserForm::open_edit`] to start from the
    /// record's current values.
    pub fn edit(service: Arc<S>, notifier: Arc<N>, key: UserKey) -> Self {
        Self::with_fields(
            service,
            notifier,
            FormMode::Edit(key),
            UserFormFields::default(),
        )
    }

    /// Edit form for `key` pre-filled from the directory.
    ///
    /// The service has no single-record read, so the list is fetched and the
    /// first record addressed by `key` is used. If the fetch fails or nothing
    /// matches, the form starts empty.
    pub async fn open_edit(service: Arc<S>, notifier: Arc<N>, key: UserKey) -> Self {
        let fields = match service.list_users().await {
            Ok(records) => match records.iter().find(|record| record.is_addressed_by(&key)) {
                Some(record) => UserFormFields::from_record(record),
                None => {
                    warn!(user = %key, "no user to pre-fill edit form from");
                    UserFormFields::default()
                }
            },
            Err(error) => {
                warn!(user = %key, %error, "could not load user for edit form");
                UserFormFields::default()
            }
        };
        Self::with_fields(service, notifier, FormMode::Edit(key), fields)
    }

    /// Whether this form creates or edits.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Current submission state.
    pub fn state(&self) -> FormState {
        if self.busy.load(Ordering::Acquire) {
            FormState::Submitting
        } else {
            FormState::Idle
        }
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state() == FormState::Submitting
    }

    /// Snapshot of the current fields.
    pub fn fields(&self) -> UserFormFields {
        self.lock_fields().clone()
    }

    /// Mutate fields in place.
    pub fn update_fields(&self, update: impl FnOnce(&mut UserFormFields)) {
        update(&mut self.lock_fields());
    }

    /// Apply raw text typed into one input.
    pub fn set_input(&self, field: FormField, raw: &str) -> Result<(), UserValidationError> {
        self.lock_fields().apply_input(field, raw)
    }

    /// Submit the form.
    ///
    /// Rejected with [`SubmitError::Busy`] while a previous submit on this
    /// form is pending. On success a create form clears its fields; both
    /// modes raise a success notice and return [`Route::UserList`]. On
    /// failure the fields are kept and a failure notice is raised.
    pub async fn submit(&self) -> Result<Route, SubmitError> {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            debug!("submit ignored while busy");
            return Err(SubmitError::Busy);
        };

        let record = self.fields().to_record()?;
        let operation = self.mode.operation();
        debug!(%operation, user = %record.first_name, "submitting user form");

        match self.send(&record).await {
            Ok(()) => {
                if self.mode == FormMode::Create {
                    *self.lock_fields() = UserFormFields::default();
                }
                if let Some(notice) = Notice::completed(operation) {
                    self.notifier.notify(notice);
                }
                Ok(Route::UserList)
            }
            Err(source) => {
                error!(%operation, error = %source, "user form submit failed");
                self.notifier.notify(Notice::failed(operation));
                Err(OperationFailure::new(operation, source).into())
            }
        }
    }

    async fn send(&self, record: &UserRecord) -> Result<(), DirectoryServiceError> {
        match &self.mode {
            FormMode::Create => self.service.create_user(record).await,
            FormMode::Edit(key) => self.service.update_user(key, record).await,
        }
    }

    fn lock_fields(&self) -> std::sync::MutexGuard<'_, UserFormFields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "user_form_tests.rs"]
mod tests;
