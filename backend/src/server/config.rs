//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use user_records::domain::UserRecordsService;

/// Everything the HTTP server needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<UserRecordsService>,
}

impl ServerConfig {
    /// Construct a server configuration around the user records service.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: Arc<UserRecordsService>) -> Self {
        Self { bind_addr, users }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
