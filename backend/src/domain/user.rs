//! User data model.
//!
//! A [`User`] is the only stored entity. Its identifier is assigned by the
//! record store when the user is created; the name is the only field the
//! domain interprets. Every other field is an opaque profile value that is
//! stored and returned untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque profile fields carried alongside a user record.
pub type Profile = Map<String, Value>;

/// Field names owned by the record store; clients cannot set them.
pub const RESERVED_FIELDS: [&str; 4] = ["_id", "id", "user_id", "name"];

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must not contain surrounding whitespace")]
    InvalidId,
}

/// Store-assigned user identifier in its textual (hex) form.
///
/// The same value is exposed as both `id` and `user_id` in responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use user_records::domain::UserId;
    ///
    /// let id = UserId::new("65f1c0ffee0000000000beef").expect("valid id");
    /// assert_eq!(id.as_ref(), "65f1c0ffee0000000000beef");
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User details supplied by a client before the store assigns an identifier.
///
/// No field is required: a missing name is stored as the empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUser {
    name: String,
    profile: Profile,
}

impl NewUser {
    /// Build a new user, dropping any profile keys the store owns.
    ///
    /// # Examples
    /// ```
    /// use serde_json::{json, Map};
    /// use user_records::domain::NewUser;
    ///
    /// let mut profile = Map::new();
    /// profile.insert("user_id".into(), json!("forged"));
    /// profile.insert("age".into(), json!(36));
    /// let user = NewUser::new("alice", profile);
    /// assert!(user.profile().get("user_id").is_none());
    /// assert_eq!(user.profile().get("age"), Some(&json!(36)));
    /// ```
    pub fn new(name: impl Into<String>, mut profile: Profile) -> Self {
        for key in RESERVED_FIELDS {
            profile.remove(key);
        }
        Self {
            name: name.into(),
            profile,
        }
    }

    /// Name used for the uniqueness check.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Pass-through profile fields.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Attach the store-assigned identifier, producing a persistable user.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            profile: self.profile,
        }
    }
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    profile: Profile,
}

impl User {
    /// Rebuild a user from stored parts.
    pub fn from_parts(id: UserId, name: impl Into<String>, profile: Profile) -> Self {
        NewUser::new(name, profile).with_id(id)
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name, unique across live records.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Pass-through profile fields.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Split into owned parts.
    pub fn into_parts(self) -> (UserId, String, Profile) {
        (self.id, self.name, self.profile)
    }
}
