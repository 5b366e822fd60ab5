//! User record model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised while building records and keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyKey,
    MissingField { field: &'static str },
    InvalidAge { input: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "user key must not be empty"),
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::InvalidAge { input } => {
                write!(f, "age must be a non-negative whole number, got {input:?}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Key addressing a record in `/api/users/{key}` routes.
///
/// The remote service addresses users by first name, so two records sharing
/// a first name are indistinguishable to update and delete calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserKey(String);

impl UserKey {
    /// Validate and construct a [`UserKey`].
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::UserKey;
    ///
    /// let key = UserKey::new("Ann").expect("valid key");
    /// assert_eq!(key.as_str(), "Ann");
    /// assert!(UserKey::new("  ").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, UserValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(UserValidationError::EmptyKey);
        }
        Ok(Self(key))
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserKey> for String {
    fn from(value: UserKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserKey {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user held by the remote directory.
///
/// ## Invariants
/// - `first_name` doubles as the addressing key; uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub age: u32,
    pub marital_status: String,
    pub is_employed: bool,
    pub is_founder: bool,
}

impl UserRecord {
    /// Whether this record is addressed by `key`.
    pub fn is_addressed_by(&self, key: &UserKey) -> bool {
        self.first_name == key.as_str()
    }

    /// Key addressing this record, if its first name is usable as one.
    pub fn key(&self) -> Result<UserKey, UserValidationError> {
        UserKey::new(self.first_name.clone())
    }

    /// Check that every required text field is present.
    ///
    /// Age and the two flags always carry a value, so only text fields can be
    /// missing.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("user name", &self.username),
            ("marital status", &self.marital_status),
        ];
        match required
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            Some((field, _)) => Err(UserValidationError::MissingField { field }),
            None => Ok(()),
        }
    }

    /// Full display name, as shown on list cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
