//! User record use cases: fetch, create, delete.
//!
//! Each use case drives the [`UserRepository`] port directly. Every store
//! call is bounded by the configured operation timeout; an elapsed timeout is
//! reported the same way as any other store failure. Nothing is retried.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, error, info};

use super::ports::{UserPersistenceError, UserRepository};
use super::{DomainError, NewUser, User, UserId};

/// Default bound applied to every request-path store call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(100);

/// Application service behind the user endpoints.
#[derive(Clone)]
pub struct UserRecordsService {
    repository: Arc<dyn UserRepository>,
    operation_timeout: Duration,
}

impl UserRecordsService {
    /// Build the service over a repository, bounding store calls by
    /// `operation_timeout`.
    pub fn new(repository: Arc<dyn UserRepository>, operation_timeout: Duration) -> Self {
        Self {
            repository,
            operation_timeout,
        }
    }

    /// Build the service with [`DEFAULT_OPERATION_TIMEOUT`].
    pub fn with_default_timeout(repository: Arc<dyn UserRepository>) -> Self {
        Self::new(repository, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Timeout applied to each store call.
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Fetch the user stored under `user_id`.
    ///
    /// # Errors
    /// [`DomainError::not_found`] when no record matches;
    /// [`DomainError::internal`] when the store fails or times out.
    pub async fn fetch(&self, user_id: &str) -> Result<User, DomainError> {
        self.find_existing(user_id).await
    }

    /// Create a user after checking that its name is unused.
    ///
    /// The count-then-insert check is not atomic; the store's unique index
    /// on `name` catches the race and surfaces it as the same conflict.
    ///
    /// # Errors
    /// [`DomainError::conflict`] when the name is taken;
    /// [`DomainError::internal`] when the store fails or times out.
    pub async fn create(&self, new_user: NewUser) -> Result<UserId, DomainError> {
        let name = new_user.name().to_owned();
        let existing = self
            .bounded("count", self.repository.count_by_name(&name))
            .await
            .map_err(|err| {
                error!(error = %err, name = %name, "duplicate-name check failed");
                DomainError::internal("error occurred while checking for the name attribute")
            })?;
        if existing > 0 {
            info!(name = %name, "rejecting duplicate user name");
            return Err(duplicate_name(&name));
        }

        let id = self.repository.next_id().map_err(|err| {
            error!(error = %err, "failed to allocate user id");
            DomainError::internal("User not created")
        })?;
        let user = new_user.with_id(id);
        match self.bounded("insert", self.repository.insert(&user)).await {
            Ok(inserted) => {
                info!(user_id = %inserted, name = %name, "user created");
                Ok(inserted)
            }
            Err(UserPersistenceError::Duplicate { .. }) => {
                info!(name = %name, "unique index rejected concurrent duplicate");
                Err(duplicate_name(&name))
            }
            Err(err) => {
                error!(error = %err, name = %name, "failed to insert user");
                Err(DomainError::internal("User not created"))
            }
        }
    }

    /// Delete the user stored under `user_id`, returning the deleted id.
    ///
    /// # Errors
    /// [`DomainError::not_found`] when no record matches, including when a
    /// concurrent delete wins between lookup and removal;
    /// [`DomainError::internal`] when the store fails or times out.
    pub async fn delete(&self, user_id: &str) -> Result<UserId, DomainError> {
        let user = self.find_existing(user_id).await?;

        let deleted = self
            .bounded("delete", self.repository.delete_by_user_id(user_id))
            .await
            .map_err(|err| {
                error!(error = %err, user_id, "failed to delete user");
                DomainError::internal(format!("Error deleting user: {err}"))
            })?;
        if deleted == 0 {
            debug!(user_id, "user vanished before delete");
            return Err(user_not_found(user_id));
        }

        info!(user_id, "user deleted");
        Ok(user.id().clone())
    }

    async fn find_existing(&self, user_id: &str) -> Result<User, DomainError> {
        let found = self
            .bounded("find", self.repository.find_by_user_id(user_id))
            .await
            .map_err(|err| {
                error!(error = %err, user_id, "failed to retrieve user");
                DomainError::internal(err.to_string())
            })?;
        found.ok_or_else(|| {
            debug!(user_id, "user not found");
            user_not_found(user_id)
        })
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T, UserPersistenceError>>,
    ) -> Result<T, UserPersistenceError> {
        tokio::time::timeout(self.operation_timeout, call)
            .await
            .map_err(|_| UserPersistenceError::timeout(operation, self.operation_timeout.as_secs()))?
    }
}

fn duplicate_name(name: &str) -> DomainError {
    DomainError::conflict(format!("User with the name '{name}' already exists"))
        .with_details(json!({ "name": name }))
}

fn user_not_found(user_id: &str) -> DomainError {
    DomainError::not_found(format!("User not found with ID: {user_id}"))
        .with_details(json!({ "userId": user_id }))
}
