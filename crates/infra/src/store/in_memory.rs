use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use usersvc_core::{DomainError, DomainResult, Entity, UserId};
use usersvc_users::{seed_users, EmailAddress, NewUser, User};

use crate::store::UserRepository;

/// Process-scoped in-memory user store.
///
/// One `RwLock` guards the whole collection: reads share, writes are
/// exclusive. Records are kept in insertion order.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Store holding the three fixed seed records.
    pub fn seeded() -> Self {
        Self::with_records(seed_users())
    }

    pub fn with_records(records: Vec<User>) -> Self {
        Self {
            inner: RwLock::new(records),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Vec<User>>> {
        self.inner
            .read()
            .map_err(|_| DomainError::internal("user store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Vec<User>>> {
        self.inner
            .write()
            .map_err(|_| DomainError::internal("user store lock poisoned"))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn live_ids(records: &[User]) -> Vec<UserId> {
    let mut ids: Vec<UserId> = records.iter().map(Entity::id).collect();
    ids.sort_unstable();
    ids
}

fn not_found(records: &[User], id: UserId) -> DomainError {
    DomainError::not_found(id, live_ids(records))
}

fn ensure_email_free(records: &[User], email: &EmailAddress, except: Option<UserId>) -> DomainResult<()> {
    let taken = records
        .iter()
        .filter(|u| Some(u.id()) != except)
        .any(|u| u.email_address().same_address(email));
    if taken {
        return Err(DomainError::conflict(format!(
            "A user with email '{}' already exists.",
            email.as_str()
        )));
    }
    Ok(())
}

impl UserRepository for InMemoryUserStore {
    fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: UserId) -> DomainResult<User> {
        let records = self.read()?;
        records
            .iter()
            .find(|u| u.id() == id)
            .cloned()
            .ok_or_else(|| not_found(&records, id))
    }

    fn insert(&self, fields: NewUser) -> DomainResult<User> {
        let mut records = self.write()?;
        ensure_email_free(&records, &fields.email, None)?;

        let id = records
            .iter()
            .map(Entity::id)
            .max()
            .map_or(UserId::FIRST, |max| max.next());
        let user = User::new(id, fields);
        records.push(user.clone());

        tracing::debug!(user_id = %id, "user inserted");
        Ok(user)
    }

    fn update(&self, id: UserId, fields: NewUser) -> DomainResult<User> {
        let mut records = self.write()?;
        let Some(index) = records.iter().position(|u| u.id() == id) else {
            return Err(not_found(&records, id));
        };
        ensure_email_free(&records, &fields.email, Some(id))?;

        let user = &mut records[index];
        user.replace(fields);

        tracing::debug!(user_id = %id, "user updated");
        Ok(user.clone())
    }

    fn remove(&self, id: UserId) -> DomainResult<User> {
        let mut records = self.write()?;
        let Some(index) = records.iter().position(|u| u.id() == id) else {
            return Err(not_found(&records, id));
        };
        let removed = records.remove(index);

        tracing::debug!(user_id = %id, "user removed");
        Ok(removed)
    }
}
