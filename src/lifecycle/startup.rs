//! Startup sequence.
//!
//! # Responsibilities
//! - Turn an application and validated config into a running server
//! - Build the versioned router before binding, so errors surface early
//!
//! # Design Decisions
//! - Ordered startup: config, routes, metrics, listener
//! - Logging is installed by the caller; this module only emits events

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::validation::{validate_config, ValidationError};
use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::routing::ApiApp;
use crate::versioning::{versioned_app, VersioningError};

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Versioning(#[from] VersioningError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Version `app` per `config` and build the server, without binding.
pub fn prepare(app: ApiApp, config: &ServiceConfig) -> Result<HttpServer, StartupError> {
    validate_config(config).map_err(StartupError::Config)?;

    let versioned = versioned_app(app, &config.versioning)?;
    for mount in versioned.mounts() {
        tracing::info!(
            prefix = %mount.prefix(),
            version = %mount.semver(),
            api_version = %mount.version(),
            custom_prefix = %mount.custom_prefix(),
            latest = mount.is_latest(),
            "Version group ready"
        );
    }
    let router = versioned.into_router()?;

    Ok(HttpServer::new(router, config.server.clone()))
}

/// Build, bind and serve until shutdown.
pub async fn run(
    app: ApiApp,
    config: ServiceConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let server = prepare(app, &config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&server.config().bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown).await?;
    Ok(())
}
