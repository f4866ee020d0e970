//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user record.
///
/// Always strictly positive. Ids are assigned by the record store, never by
/// clients.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// The id handed out when the store is empty.
    pub const FIRST: UserId = UserId(1);

    /// Validate a raw integer as a user id.
    pub fn new(raw: i64) -> Result<Self, DomainError> {
        if raw <= 0 {
            return Err(DomainError::invalid_argument(format!(
                "ID must be a positive integer. Received: {raw}"
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// The id following this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::invalid_argument(format!("ID must be a positive integer. Received: {s}")))?;
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(UserId::new(0), Err(DomainError::InvalidArgument(_))));
        assert!(matches!(UserId::new(-7), Err(DomainError::InvalidArgument(_))));
        assert_eq!(UserId::new(3).unwrap().get(), 3);
    }

    #[test]
    fn parses_from_path_segment() {
        assert_eq!("42".parse::<UserId>().unwrap().get(), 42);
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
    }

    #[test]
    fn next_is_monotonic() {
        assert_eq!(UserId::FIRST.next().get(), 2);
    }
}
