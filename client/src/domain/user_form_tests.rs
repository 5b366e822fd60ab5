//! Tests for the create and edit form controllers.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use async_trait::async_trait;
use rstest::{fixture, rstest};
use tokio::sync::Notify;

use super::*;
use crate::domain::NoticeLevel;
use crate::domain::ports::{MockDirectoryService, RecordingNotifier};

fn cid() -> UserRecord {
    UserRecord {
        first_name: "Cid".to_owned(),
        last_name: "X".to_owned(),
        username: "cid1".to_owned(),
        age: 30,
        marital_status: "Single".to_owned(),
        is_employed: true,
        is_founder: false,
    }
}

fn key(raw: &str) -> UserKey {
    UserKey::new(raw).expect("fixture key")
}

#[fixture]
fn notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::default())
}

fn fill<S: DirectoryService + ?Sized, N: Notifier + ?Sized>(form: &UserForm<S, N>) {
    for (field, raw) in [
        (FormField::FirstName, "Cid"),
        (FormField::LastName, "X"),
        (FormField::UserName, "cid1"),
        (FormField::Age, "30"),
        (FormField::MaritalStatus, "Single"),
        (FormField::IsEmployed, "true"),
        (FormField::IsFounder, "false"),
    ] {
        form.set_input(field, raw).expect("valid input");
    }
}

/// Directory whose create and update calls block until released.
#[derive(Default)]
struct GatedDirectory {
    writes: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl GatedDirectory {
    async fn hold(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl DirectoryService for GatedDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryServiceError> {
        Ok(Vec::new())
    }

    async fn create_user(&self, _user: &UserRecord) -> Result<(), DirectoryServiceError> {
        self.hold().await;
        Ok(())
    }

    async fn update_user(
        &self,
        _key: &UserKey,
        _user: &UserRecord,
    ) -> Result<(), DirectoryServiceError> {
        self.hold().await;
        Ok(())
    }

    async fn delete_user(&self, _key: &UserKey) -> Result<(), DirectoryServiceError> {
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn create_sends_exact_payload_once_and_clears_fields(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service
        .expect_create_user()
        .withf(|user| *user == cid())
        .times(1)
        .return_once(|_| Ok(()));
    let form = UserForm::create(Arc::new(service), notifier.clone());
    fill(&form);

    let route = form.submit().await.expect("submit succeeds");

    assert_eq!(route, Route::UserList);
    assert_eq!(form.fields(), UserFormFields::default());
    assert_eq!(form.state(), FormState::Idle);
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level(), NoticeLevel::Success);
    assert_eq!(notices[0].message(), "User added successfully!");
}

#[rstest]
#[tokio::test]
async fn failed_create_keeps_fields_for_retry(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service
        .expect_create_user()
        .times(1)
        .return_once(|_| Err(DirectoryServiceError::transport("status 502")));
    let form = UserForm::create(Arc::new(service), notifier.clone());
    fill(&form);
    let before = form.fields();

    let error = form.submit().await.expect_err("submit fails");

    assert!(matches!(
        error,
        SubmitError::Failed(ref failure) if failure.operation() == DirectoryOperation::Create
    ));
    assert_eq!(form.fields(), before);
    assert!(!form.is_submitting());
    let notices = notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level(), NoticeLevel::Failure);
    assert_eq!(notices[0].message(), "Failed to add user. Please try again.");
}

#[rstest]
#[case::create(None)]
#[case::edit(Some("Ann"))]
#[tokio::test]
async fn second_submit_while_in_flight_is_rejected(
    notifier: Arc<RecordingNotifier>,
    #[case] edit_key: Option<&str>,
) {
    let service = Arc::new(GatedDirectory::default());
    let form = match edit_key {
        Some(raw) => UserForm::edit(service.clone(), notifier, key(raw)),
        None => UserForm::create(service.clone(), notifier),
    };
    fill(&form);

    let first = form.submit();
    let second = async {
        service.entered.notified().await;
        assert!(form.is_submitting());
        let outcome = form.submit().await;
        service.release.notify_one();
        outcome
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, Ok(Route::UserList));
    assert_eq!(second, Err(SubmitError::Busy));
    assert_eq!(service.writes.load(Ordering::SeqCst), 1);
    assert_eq!(form.state(), FormState::Idle);
}

#[rstest]
#[tokio::test]
async fn invalid_fields_send_nothing(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service.expect_create_user().times(0);
    let form = UserForm::create(Arc::new(service), notifier.clone());
    fill(&form);
    form.update_fields(|fields| fields.last_name.clear());

    let error = form.submit().await.expect_err("validation fails");

    assert_eq!(
        error,
        SubmitError::Invalid(UserValidationError::MissingField { field: "last name" })
    );
    assert_eq!(form.fields().first_name, "Cid");
    assert!(notifier.notices().is_empty());
    assert!(!form.is_submitting());
}

#[rstest]
#[tokio::test]
async fn edit_puts_full_record_to_key_and_keeps_fields(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service
        .expect_update_user()
        .withf(|key, user| key.as_str() == "Ann" && *user == cid())
        .times(1)
        .return_once(|_, _| Ok(()));
    let form = UserForm::edit(Arc::new(service), notifier.clone(), key("Ann"));
    fill(&form);

    let route = form.submit().await.expect("submit succeeds");

    assert_eq!(route, Route::UserList);
    assert_eq!(form.fields().first_name, "Cid");
    assert_eq!(notifier.notices()[0].message(), "User updated successfully!");
}

#[rstest]
#[tokio::test]
async fn failed_edit_raises_update_notice(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service
        .expect_update_user()
        .times(1)
        .return_once(|_, _| Err(DirectoryServiceError::not_found("status 404")));
    let form = UserForm::edit(Arc::new(service), notifier.clone(), key("Ann"));
    fill(&form);
    let before = form.fields();

    let error = form.submit().await.expect_err("submit fails");

    assert!(matches!(
        error,
        SubmitError::Failed(ref failure) if failure.operation() == DirectoryOperation::Update
    ));
    assert_eq!(form.fields(), before);
    assert!(!form.is_submitting());
    assert_eq!(form.state(), FormState::Idle);
    assert_eq!(notifier.notices()[0].message(), "Failed to update user.");
}

#[rstest]
#[tokio::test]
async fn form_accepts_trait_object_collaborators() {
    let service: Arc<dyn DirectoryService> = Arc::new(GatedDirectory::default());
    let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::default());
    let form = UserForm::create(service, notifier);

    assert_eq!(form.fields(), UserFormFields::default());
    assert!(!form.is_submitting());
}

#[rstest]
#[tokio::test]
async fn plain_edit_form_starts_empty(notifier: Arc<RecordingNotifier>) {
    let mut service = MockDirectoryService::new();
    service.expect_list_users().times(0);
    let form = UserForm::edit(Arc::new(service), notifier, key("Ann"));

    assert_eq!(form.fields(), UserFormFields::default());
    assert_eq!(form.mode(), &FormMode::Edit(key("Ann")));
}

#[rstest]
#[tokio::test]
async fn open_edit_prefills_from_first_addressed_record(notifier: Arc<RecordingNotifier>) {
    let mut older = cid();
    older.first_name = "Ann".to_owned();
    older.age = 41;
    let mut newer = older.clone();
    newer.age = 52;
    let mut service = MockDirectoryService::new();
    service
        .expect_list_users()
        .times(1)
        .return_once(move || Ok(vec![cid(), older, newer]));

    let form = UserForm::open_edit(Arc::new(service), notifier, key("Ann")).await;

    let fields = form.fields();
    assert_eq!(fields.first_name, "Ann");
    assert_eq!(fields.age, 41);
    assert_eq!(fields.user_name, "cid1");
}

#[rstest]
#[case::fetch_fails(Err(DirectoryServiceError::timeout("slow")))]
#[case::no_match(Ok(vec![cid()]))]
#[tokio::test]
async fn open_edit_falls_back_to_empty_fields(
    notifier: Arc<RecordingNotifier>,
    #[case] listing: Result<Vec<UserRecord>, DirectoryServiceError>,
) {
    let mut service = MockDirectoryService::new();
    service
        .expect_list_users()
        .times(1)
        .return_once(move || listing);

    let form = UserForm::open_edit(Arc::new(service), notifier.clone(), key("Ann")).await;

    assert_eq!(form.fields(), UserFormFields::default());
    assert!(notifier.notices().is_empty());
}

#[test]
fn non_numeric_age_keeps_previous_value() {
    let mut fields = UserFormFields {
        age: 12,
        ..UserFormFields::default()
    };

    let error = fields
        .apply_input(FormField::Age, "twelve")
        .expect_err("age must be numeric");

    assert_eq!(
        error,
        UserValidationError::InvalidAge {
            input: "twelve".to_owned()
        }
    );
    assert_eq!(fields.age, 12);
}

#[rstest]
#[case("true", true)]
#[case("false", false)]
#[case("TRUE", false)]
#[case("yes", false)]
#[case("", false)]
fn flags_follow_literal_true(#[case] raw: &str, #[case] expected: bool) {
    let mut fields = UserFormFields::default();
    fields
        .apply_input(FormField::IsFounder, raw)
        .expect("flags always parse");
    assert_eq!(fields.is_founder, expected);
}

#[test]
fn record_round_trips_through_fields() {
    let fields = UserFormFields::from_record(&cid());
    assert_eq!(fields.to_record(), Ok(cid()));
}
