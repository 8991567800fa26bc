//! User entity and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::UserValidationError;

/// Numeric user identifier, assigned by the repository and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full user record, including the clear-text password
///
/// Deliberately not `Serialize`: the only representation that leaves the
/// service is [`SafeUser`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a record stamped with the current time
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        Self::with_created_at(id, new_user, Utc::now())
    }

    /// Create a record with an explicit creation timestamp
    pub fn with_created_at(id: UserId, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            created_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Compare a candidate password against the stored one (exact match)
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    // Mutators

    /// Replace name, email and password; id and creation time are kept
    pub fn replace(&mut self, data: NewUser) {
        self.name = data.name;
        self.email = data.email;
        self.password = data.password;
    }

    /// Replace only the fields present in the patch
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Project into the password-free view
    pub fn to_safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Password-free view of a user, the only shape returned across a boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Complete user input, used for registration and full replacement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewUser {
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Partial user input; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UserPatch {
    /// Check whether the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(UserId::new(1), NewUser::new("Ann", "a@x.com", "secret1"))
    }

    #[test]
    fn test_user_id_parse() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_user_id_parse_invalid() {
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
    }

    #[test]
    fn test_safe_view_omits_password() {
        let user = create_test_user();
        let json = serde_json::to_value(user.to_safe()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["email"], "a@x.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_replace_keeps_id_and_created_at() {
        let mut user = create_test_user();
        let created_at = user.created_at();

        user.replace(NewUser::new("Bob", "b@x.com", "another1"));

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.created_at(), created_at);
        assert_eq!(user.name(), "Bob");
        assert_eq!(user.email(), "b@x.com");
        assert!(user.password_matches("another1"));
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut user = create_test_user();

        user.apply(UserPatch::default().with_name("Annie"));

        assert_eq!(user.name(), "Annie");
        assert_eq!(user.email(), "a@x.com");
        assert!(user.password_matches("secret1"));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut user = create_test_user();
        let before = user.clone();

        let patch = UserPatch::default();
        assert!(patch.is_empty());
        user.apply(patch);

        assert_eq!(user, before);
    }

    #[test]
    fn test_new_user_accepts_nombre_alias() {
        let input: NewUser =
            serde_json::from_str(r#"{"nombre":"Ann","email":"a@x.com","password":"secret1"}"#)
                .unwrap();
        assert_eq!(input.name, "Ann");
    }

    #[test]
    fn test_new_user_missing_fields_default_to_empty() {
        let input: NewUser = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(input.name, "");
        assert_eq!(input.password, "");
    }

    #[test]
    fn test_patch_deserialization() {
        let patch: UserPatch = serde_json::from_str(r#"{"email":"new@x.com"}"#).unwrap();
        assert_eq!(patch.email.as_deref(), Some("new@x.com"));
        assert!(patch.name.is_none());
        assert!(!patch.is_empty());
    }
}
