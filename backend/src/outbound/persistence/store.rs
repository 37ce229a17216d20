//! MongoDB connection bootstrap.
//!
//! Opens a client from a connection URL, proves connectivity with a bounded
//! `ping`, and hands back the collection handle the repository works on. The
//! handle lives for the whole process; pooling and reconnects are left to the
//! driver.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::info;

use super::models::UserDocument;

/// Default database holding the user collection.
pub const DEFAULT_DATABASE: &str = "Cluster0";
/// Default collection name for user documents.
pub const DEFAULT_COLLECTION: &str = "users";
/// Default bound on connection establishment and the startup ping.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while connecting to the record store at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection URL or client options were rejected.
    #[error("invalid MongoDB connection options: {message}")]
    Options { message: String },

    /// The server answered the ping with an error or was unreachable.
    #[error("MongoDB ping failed: {message}")]
    Ping { message: String },

    /// No ping answer arrived within the connect timeout.
    #[error("MongoDB did not answer ping within {seconds}s")]
    PingTimeout { seconds: u64 },

    /// An index required by the repository could not be created.
    #[error("failed to create index on `{field}`: {message}")]
    Index { field: String, message: String },
}

impl StoreError {
    /// Create an options error with the given message.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }

    /// Create an index error for `field`.
    pub fn index(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Index {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Connection settings for the record store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_records::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("records")
///     .with_connect_timeout(Duration::from_secs(3));
/// assert_eq!(config.database(), "records");
/// assert_eq!(config.collection(), "users");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    url: String,
    database: String,
    collection: String,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for `url` with the default database,
    /// collection, and connect timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: DEFAULT_DATABASE.to_owned(),
            collection: DEFAULT_COLLECTION.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the bound on connection establishment and the startup ping.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connection URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Connect to MongoDB, verify liveness, and open the user collection.
///
/// # Errors
/// Returns [`StoreError`] when the URL is invalid, the ping fails, or the
/// ping does not complete within [`StoreConfig::connect_timeout`]. Callers
/// treat every variant as fatal.
pub async fn connect(config: &StoreConfig) -> Result<Collection<UserDocument>, StoreError> {
    let mut options = ClientOptions::parse(config.url())
        .await
        .map_err(|e| StoreError::options(e.to_string()))?;
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());

    let client = Client::with_options(options).map_err(|e| StoreError::options(e.to_string()))?;
    let database = client.database(config.database());

    tokio::time::timeout(
        config.connect_timeout(),
        database.run_command(doc! { "ping": 1 }),
    )
    .await
    .map_err(|_| StoreError::PingTimeout {
        seconds: config.connect_timeout().as_secs(),
    })?
    .map_err(|e| StoreError::ping(e.to_string()))?;

    info!(
        database = config.database(),
        collection = config.collection(),
        "connected to MongoDB"
    );
    Ok(database.collection::<UserDocument>(config.collection()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_the_deployed_layout() {
        let config = StoreConfig::new("mongodb://localhost:27017");

        assert_eq!(config.url(), "mongodb://localhost:27017");
        assert_eq!(config.database(), DEFAULT_DATABASE);
        assert_eq!(config.collection(), DEFAULT_COLLECTION);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[rstest]
    #[tokio::test]
    async fn connect_rejects_malformed_urls() {
        let err = connect(&StoreConfig::new("not-a-mongodb-url"))
            .await
            .expect_err("malformed URL is rejected");

        assert!(matches!(err, StoreError::Options { .. }));
    }

    #[rstest]
    fn errors_render_their_context() {
        let err = StoreError::index("name", "E11000 duplicate key");
        assert_eq!(
            err.to_string(),
            "failed to create index on `name`: E11000 duplicate key"
        );
    }
}
