//! # GC Checkout Server
//!
//! Web server for event registrations and mobile-money payments, built on `Axum`,
//! `SurrealDB` and an in-process event bus.
//!
//! ## Example
//! ```no_run
//! use gc_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(8080)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

pub mod router;

use anyhow::{Context, Result, anyhow};
use axum_server::Handle;
use gc::domain::config::{ApiConfig, LoggingConfig};
use gc::kernel::server::state::ApiState;
use gc_database::Database;
use gc_event_bus::EventBus;
use gc_logger::{LevelFilter, Logger};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

/// Installs the global logger described by the `logging` config section.
///
/// Keep the returned [`Logger`] alive for the lifetime of the process.
///
/// # Errors
/// Returns an error for an unknown level, a bad filter directive or an unusable log
/// directory.
pub fn init_logger(cfg: &LoggingConfig) -> Result<Logger> {
    let level = cfg
        .level
        .parse::<LevelFilter>()
        .with_context(|| format!("Invalid log level: {}", cfg.level))?;

    let mut builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &cfg.directory {
        Some(directory) => builder.path(directory).json(cfg.json).init(),
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    async fn init_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder = Database::builder()
            .url(&db_cfg.url)
            .session(&db_cfg.namespace, &db_cfg.database)
            .migrations(gc::migrations());

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates the TLS files, when TLS is configured
    /// 2. Connects to `SurrealDB` and applies pending migrations
    /// 3. Builds the registrations and payments slices over a shared event bus
    /// 4. Constructs application state
    ///
    /// # Errors
    /// Returns an error if:
    /// * Database connection or a migration fails
    /// * SSL certificate/key files are missing
    /// * The payment gateway client cannot be built
    pub async fn build(self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let db = self.init_database().await?;

        let events = EventBus::new();
        let slices = gc::init(&self.cfg, &db, &events)
            .map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .db(db)
            .events(events)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;
        info!(slices = ?state.slice_names().collect::<Vec<_>>(), "Feature slices registered");

        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// Starts the server and runs until a shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);
        let events = self.state.events.clone();

        info!(address = %address, ssl = cfg.server.ssl.is_some(), "Starting server");

        let app = router::init(self.state);

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            // Wakes pending status long-polls so connections can drain.
            events.shutdown();
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Waits for SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
