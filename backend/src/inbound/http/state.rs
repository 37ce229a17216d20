//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::UserRepository;
use crate::domain::UserRecordsService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<UserRecordsService>,
}

impl HttpState {
    /// Wrap an already-built service.
    pub fn new(users: Arc<UserRecordsService>) -> Self {
        Self { users }
    }

    /// Build the state from a repository and the per-operation timeout.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use user_records::domain::ports::InMemoryUserRepository;
    /// use user_records::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::from_repository(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Duration::from_secs(5),
    /// );
    /// assert_eq!(state.users.operation_timeout(), Duration::from_secs(5));
    /// ```
    pub fn from_repository(repository: Arc<dyn UserRepository>, timeout: Duration) -> Self {
        Self::new(Arc::new(UserRecordsService::new(repository, timeout)))
    }
}
