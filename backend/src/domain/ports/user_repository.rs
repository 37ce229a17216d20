//! Port abstraction for user record persistence adapters and their errors.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique index rejected the write.
        Duplicate { name: String } => "user with the name '{name}' already exists",
        /// The operation did not finish within the configured bound.
        Timeout { operation: String, seconds: u64 } =>
            "user repository {operation} timed out after {seconds}s",
    }
}

/// Record store operations backing the user endpoints.
///
/// Lookups take the raw `user_id` string: callers pass path parameters
/// through without format validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Allocate a fresh store identifier for a user about to be inserted.
    fn next_id(&self) -> Result<UserId, UserPersistenceError>;

    /// Fetch the user whose `user_id` equals `user_id`.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Count users sharing `name`.
    async fn count_by_name(&self, name: &str) -> Result<u64, UserPersistenceError>;

    /// Insert a new user, returning the identifier the store recorded.
    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError>;

    /// Delete at most one user with `user_id`, returning how many were removed.
    async fn delete_by_user_id(&self, user_id: &str) -> Result<u64, UserPersistenceError>;
}

/// In-process repository used by tests and local runs without MongoDB.
///
/// Identifiers are 24-character hex strings drawn from a counter, matching
/// the shape of store-generated ones. Names are unique, mirroring the unique
/// index the MongoDB adapter creates.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    next: AtomicU64,
    users: Mutex<BTreeMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_users<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, User>) -> T,
    ) -> Result<T, UserPersistenceError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    fn next_id(&self) -> Result<UserId, UserPersistenceError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        UserId::new(format!("{n:024x}")).map_err(|err| UserPersistenceError::query(err.to_string()))
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, UserPersistenceError> {
        self.with_users(|users| users.get(user_id).cloned())
    }

    async fn count_by_name(&self, name: &str) -> Result<u64, UserPersistenceError> {
        self.with_users(|users| {
            let count = users.values().filter(|user| user.name() == name).count();
            u64::try_from(count).unwrap_or(u64::MAX)
        })
    }

    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        self.with_users(|users| {
            if users.values().any(|existing| existing.name() == user.name()) {
                return Err(UserPersistenceError::duplicate(user.name()));
            }
            users.insert(user.id().to_string(), user.clone());
            Ok(user.id().clone())
        })?
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<u64, UserPersistenceError> {
        self.with_users(|users| u64::from(users.remove(user_id).is_some()))
    }
}
