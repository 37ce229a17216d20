//! Backend entry-point: loads settings, connects to MongoDB, and serves the
//! user record endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, StartupError, create_server};
use user_records::domain::UserRecordsService;
use user_records::inbound::http::{HealthState, health::fail_liveness_on};
use user_records::outbound::persistence::{MongoUserRepository, connect};
use user_records::settings::{AppSettings, load_env_file};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Read before tracing init so RUST_LOG may come from the file.
    let dotenv = load_env_file(None);

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(e) => debug!(error = %e, "no environment file loaded"),
    }

    run().await.map_err(|err| {
        error!(error = %err, "user records server failed");
        std::io::Error::from(err)
    })
}

async fn run() -> Result<(), StartupError> {
    let settings = AppSettings::load().map_err(|e| StartupError::Config {
        message: e.to_string(),
    })?;
    let bind_addr = settings.bind_addr()?;
    let store_config = settings.store_config()?;

    let repository = MongoUserRepository::new(connect(&store_config).await?);
    repository.ensure_indexes().await?;
    let users = Arc::new(UserRecordsService::new(
        Arc::new(repository),
        settings.operation_timeout(),
    ));

    let config = ServerConfig::new(bind_addr, users);
    info!(
        addr = %config.bind_addr(),
        operation_timeout_secs = settings.operation_timeout().as_secs(),
        "starting HTTP server"
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(fail_liveness_on(health_state, shutdown_signal()));
    server.await.map_err(StartupError::Serve)
}

/// Resolve on SIGINT or SIGTERM. Actix listens for the same signals and
/// drains the workers; this only drives the liveness flag.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
