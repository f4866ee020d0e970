use std::sync::Arc;

use usersvc_core::{DomainResult, UserId};
use usersvc_users::{NewUser, User};

/// Storage contract for user records.
///
/// Every method is a single atomic step: implementations must run the
/// uniqueness check and the mutation of `insert`/`update` under the same
/// exclusive section.
pub trait UserRepository: Send + Sync {
    /// Snapshot of all live records in insertion order.
    fn list(&self) -> DomainResult<Vec<User>>;

    /// Record with this id, or `NotFound` listing the live ids.
    fn get(&self, id: UserId) -> DomainResult<User>;

    /// Assign the next id and append. `Conflict` on a duplicate email.
    fn insert(&self, fields: NewUser) -> DomainResult<User>;

    /// Overwrite name and email of an existing record.
    fn update(&self, id: UserId, fields: NewUser) -> DomainResult<User>;

    /// Remove a record, returning it.
    fn remove(&self, id: UserId) -> DomainResult<User>;
}

impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    fn list(&self) -> DomainResult<Vec<User>> {
        (**self).list()
    }

    fn get(&self, id: UserId) -> DomainResult<User> {
        (**self).get(id)
    }

    fn insert(&self, fields: NewUser) -> DomainResult<User> {
        (**self).insert(fields)
    }

    fn update(&self, id: UserId, fields: NewUser) -> DomainResult<User> {
        (**self).update(id, fields)
    }

    fn remove(&self, id: UserId) -> DomainResult<User> {
        (**self).remove(id)
    }
}
