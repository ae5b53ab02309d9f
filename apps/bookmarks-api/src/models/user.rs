use diesel::prelude::*;

use crate::db::schema::users;
use crate::error::FieldError;

/// Maximum length, in characters, of a username or password.
pub const MAX_CREDENTIAL_LEN: usize = 255;

/// Full user row from the database.
///
/// Passwords are stored and compared as plaintext.
#[derive(Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Insertable struct for creating a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_credential("username", &self.username, &mut errors);
        check_credential("password", &self.password, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_credential(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if len == 0 || len > MAX_CREDENTIAL_LEN {
        errors.push(FieldError::new(
            field,
            format!("{field} must be 1–{MAX_CREDENTIAL_LEN} characters"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, username: &str, password: &str) -> User {
        User {
            id,
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn equality_covers_id_username_and_password() {
        assert_eq!(user(1, "alice", "pw1"), user(1, "alice", "pw1"));
        assert_ne!(user(1, "alice", "pw1"), user(2, "alice", "pw1"));
        assert_ne!(user(1, "alice", "pw1"), user(1, "Alice", "pw1"));
        assert_ne!(user(1, "alice", "pw1"), user(1, "alice", "PW1"));
    }

    #[test]
    fn debug_never_prints_password() {
        let rendered = format!("{:?}", user(7, "alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn new_user_requires_both_credentials() {
        let errors = NewUser::new("", "").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "password"]);
    }

    #[test]
    fn new_user_length_is_counted_in_characters() {
        assert!(NewUser::new("é".repeat(255), "pw").validate().is_ok());
        assert!(NewUser::new("a".repeat(256), "pw").validate().is_err());
    }
}
