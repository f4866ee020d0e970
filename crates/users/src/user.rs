use serde::Serialize;

use usersvc_core::{DomainResult, Entity, UserId, ValueObject};

use crate::validation::{validate_payload, UserPayload};

/// Display name of a user. Trimmed, 1–100 characters, restricted charset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub(crate) fn from_validated(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for UserName {}

/// Email address of a user. Trimmed; uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub(crate) fn from_validated(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison used for uniqueness checks.
    pub fn same_address(&self, other: &EmailAddress) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl ValueObject for EmailAddress {}

/// A validated name/email pair, ready to be stored (create) or written over
/// an existing record (update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: EmailAddress,
}

impl NewUser {
    /// Convenience for callers holding plain strings (seeding, tests).
    pub fn parse(name: &str, email: &str) -> DomainResult<Self> {
        validate_payload(Some(&UserPayload {
            id: None,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }))
    }
}

/// A live user record.
///
/// # Invariants
/// - `id` is assigned by the store and never changes.
/// - `name` and `email` always hold values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    pub fn new(id: UserId, fields: NewUser) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email
    }

    /// Overwrite name and email. The id is untouched.
    pub fn replace(&mut self, fields: NewUser) {
        self.name = fields.name;
        self.email = fields.email;
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_record() {
        let user = User::new(
            UserId::new(7).unwrap(),
            NewUser::parse("Ann Lee", "ann@x.com").unwrap(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "Ann Lee", "email": "ann@x.com"}));
    }

    #[test]
    fn replace_keeps_id() {
        let mut user = User::new(UserId::FIRST, NewUser::parse("Ann Lee", "ann@x.com").unwrap());
        user.replace(NewUser::parse("Ann Smith", "ann.smith@x.com").unwrap());
        assert_eq!(user.id(), UserId::FIRST);
        assert_eq!(user.name(), "Ann Smith");
        assert_eq!(user.email(), "ann.smith@x.com");
    }

    #[test]
    fn same_address_ignores_case() {
        let a = EmailAddress::from_validated("Jane.Smith@Example.com");
        let b = EmailAddress::from_validated("jane.smith@example.COM");
        assert!(a.same_address(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn parse_trims_name() {
        let fields = NewUser::parse("  Ann Lee ", "ann@x.com").unwrap();
        assert_eq!(fields.name.as_str(), "Ann Lee");
        assert_eq!(fields.email.as_str(), "ann@x.com");
    }
}
