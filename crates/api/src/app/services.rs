//! Service wiring between HTTP handlers and the record store.

use std::sync::Arc;

use usersvc_core::{DomainError, Entity, UserId};
use usersvc_infra::{InMemoryUserStore, UserRepository};
use usersvc_users::{list_users, validate_payload, ListRequest, User, UserPage, UserPayload};

use crate::app::errors::ApiError;

/// Shared application services (one instance per process).
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn UserRepository>,
    disclose_ids: bool,
}

impl AppServices {
    pub fn new(store: Arc<dyn UserRepository>, disclose_ids: bool) -> Self {
        Self { store, disclose_ids }
    }

    /// Seeded in-memory store (the only backend today).
    pub fn in_memory(disclose_ids: bool) -> Self {
        Self::new(Arc::new(InMemoryUserStore::seeded()), disclose_ids)
    }

    fn err(&self, err: DomainError) -> ApiError {
        ApiError::from_domain(err, self.disclose_ids)
    }

    pub fn list_users(&self, request: ListRequest) -> Result<UserPage, ApiError> {
        // Parameters are checked before the store is touched.
        let query = request.validate().map_err(|e| self.err(e))?;
        let records = self.store.list().map_err(|e| self.err(e))?;
        Ok(list_users(&records, &query))
    }

    pub fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.store.get(id).map_err(|e| self.err(e))
    }

    pub fn create_user(&self, payload: Option<&UserPayload>) -> Result<User, ApiError> {
        let fields = validate_payload(payload).map_err(|e| self.err(e))?;
        let user = self.store.insert(fields).map_err(|e| self.err(e))?;
        tracing::info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    pub fn update_user(&self, id: UserId, payload: Option<&UserPayload>) -> Result<User, ApiError> {
        // Missing records are reported before body validation.
        self.store.get(id).map_err(|e| self.err(e))?;
        let fields = validate_payload(payload).map_err(|e| self.err(e))?;
        let user = self.store.update(id, fields).map_err(|e| self.err(e))?;
        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    pub fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.store.remove(id).map_err(|e| self.err(e))?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            id: None,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }

    fn id(raw: i64) -> UserId {
        UserId::new(raw).unwrap()
    }

    #[test]
    fn bad_list_params_fail_before_store_access() {
        struct PanickingStore;
        impl UserRepository for PanickingStore {
            fn list(&self) -> usersvc_core::DomainResult<Vec<User>> {
                panic!("store must not be touched")
            }
            fn get(&self, _: UserId) -> usersvc_core::DomainResult<User> {
                unreachable!()
            }
            fn insert(&self, _: usersvc_users::NewUser) -> usersvc_core::DomainResult<User> {
                unreachable!()
            }
            fn update(&self, _: UserId, _: usersvc_users::NewUser) -> usersvc_core::DomainResult<User> {
                unreachable!()
            }
            fn remove(&self, _: UserId) -> usersvc_core::DomainResult<User> {
                unreachable!()
            }
        }

        let services = AppServices::new(Arc::new(PanickingStore), true);
        let err = services
            .list_users(ListRequest {
                page: Some(0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[test]
    fn update_of_missing_record_is_not_found_even_with_bad_body() {
        let services = AppServices::in_memory(true);
        let err = services.update_user(id(42), None).unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                id: id(42),
                available: Some(vec![id(1), id(2), id(3)]),
            }
        );
    }

    #[test]
    fn disclosure_can_be_disabled() {
        let services = AppServices::in_memory(false);
        let err = services.get_user(id(42)).unwrap_err();
        assert_eq!(err, ApiError::NotFound { id: id(42), available: None });
    }

    #[test]
    fn create_update_delete_round() {
        let services = AppServices::in_memory(true);
        let created = services
            .create_user(Some(&payload("Ann Lee", "ann@x.com")))
            .unwrap();
        assert_eq!(created.id(), id(4));

        let err = services
            .update_user(id(4), Some(&payload("Ann Lee", "jane.smith@example.com")))
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        services.delete_user(id(4)).unwrap();
        assert!(matches!(services.get_user(id(4)), Err(ApiError::NotFound { .. })));
    }
}
