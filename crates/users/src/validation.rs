//! Field validation for create/update payloads.
//!
//! Each field has an ordered list of rules. A rule returns `Some(message)`
//! when violated; the first violation per field is reported and violations
//! from all fields are aggregated. Checks that don't fit the rule model
//! (blank-after-trim) run afterwards and report a single message.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use usersvc_core::{DomainError, DomainResult, FieldViolation};

use crate::user::{EmailAddress, NewUser, UserName};

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 254;

static NAME_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\s'.\-]+$").expect("static regex"));
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"));

/// Create/update request body. `id` is accepted for compatibility and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

type Rule = fn(&str) -> Option<String>;

struct FieldRules {
    field: &'static str,
    rules: &'static [Rule],
}

impl FieldRules {
    fn check(&self, value: &str) -> Option<FieldViolation> {
        self.rules
            .iter()
            .find_map(|rule| rule(value))
            .map(|message| FieldViolation::new(self.field, message))
    }
}

const NAME_RULES: FieldRules = FieldRules {
    field: "name",
    rules: &[name_required, name_length, name_charset],
};

const EMAIL_RULES: FieldRules = FieldRules {
    field: "email",
    rules: &[email_required, email_length, email_shape],
};

fn name_required(value: &str) -> Option<String> {
    value.is_empty().then(|| "Name is required.".to_string())
}

fn name_length(value: &str) -> Option<String> {
    let len = value.chars().count();
    (!(1..=NAME_MAX_CHARS).contains(&len))
        .then(|| format!("Name must be between 1 and {NAME_MAX_CHARS} characters."))
}

fn name_charset(value: &str) -> Option<String> {
    (!NAME_CHARSET.is_match(value)).then(|| {
        "Name can only contain letters, spaces, apostrophes, hyphens, and periods.".to_string()
    })
}

fn email_required(value: &str) -> Option<String> {
    value.is_empty().then(|| "Email is required.".to_string())
}

fn email_length(value: &str) -> Option<String> {
    (value.chars().count() > EMAIL_MAX_CHARS)
        .then(|| format!("Email cannot exceed {EMAIL_MAX_CHARS} characters."))
}

fn email_shape(value: &str) -> Option<String> {
    (!EMAIL_SHAPE.is_match(value)).then(|| "Email must be a valid email address.".to_string())
}

/// Validate a create/update payload.
///
/// Order: payload presence, field rules (aggregated), blank-after-trim.
/// Uniqueness is checked by the store, under its write lock.
pub fn validate_payload(payload: Option<&UserPayload>) -> DomainResult<NewUser> {
    let payload =
        payload.ok_or_else(|| DomainError::invalid_argument("User data is required."))?;

    let name = payload.name.as_deref().unwrap_or_default();
    let email = payload.email.as_deref().unwrap_or_default();

    let violations: Vec<FieldViolation> = [NAME_RULES.check(name), EMAIL_RULES.check(email)]
        .into_iter()
        .flatten()
        .collect();
    if !violations.is_empty() {
        return Err(DomainError::validation(violations));
    }

    if name.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "Name cannot be empty or whitespace.",
        ));
    }
    if email.trim().is_empty() {
        return Err(DomainError::invalid_argument(
            "Email cannot be empty or whitespace.",
        ));
    }

    Ok(NewUser {
        name: UserName::from_validated(name),
        email: EmailAddress::from_validated(email),
    })
}
