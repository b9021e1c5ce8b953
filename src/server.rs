//! Reusable server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! store connection, indexes, services, REST API, metrics, and graceful
//! shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{error, info, warn};

use crate::application::{JobService, UserService};
use crate::config::{AppConfig, DbDriver};
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::{ensure_indexes, init_database, MongoRepositoryProvider};
use crate::infrastructure::storage::InMemoryRepositoryProvider;
use crate::interfaces::http::{create_api_router, ApiServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Create MongoDB indexes on startup (default: true).
    pub ensure_indexes: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            ensure_indexes: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running job board service.
///
/// ```rust,no_run
/// use jobboard::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to.
    pub local_addr: std::net::SocketAddr,

    mongo_client: Option<mongodb::Client>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// 1. Install the Prometheus metrics recorder
    /// 2. Connect the configured store and ensure indexes
    /// 3. Build services and the REST API router
    /// 4. Bind and serve until the shutdown signal fires
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting job board service...");

        let prometheus_handle = prometheus_handle();

        // ── Store ──────────────────────────────────────────────
        let (repos, mongo_client): (Arc<dyn RepositoryProvider>, Option<mongodb::Client>) =
            match app_cfg.database.driver {
                DbDriver::MongoDb => {
                    info!("Database: {}", app_cfg.database.redacted_uri());
                    let (client, db) =
                        init_database(&app_cfg.database.to_database_config()).await?;
                    if opts.ensure_indexes {
                        ensure_indexes(&db).await?;
                    }
                    (Arc::new(MongoRepositoryProvider::new(db)), Some(client))
                }
                DbDriver::Memory => {
                    warn!("Using in-memory storage; data is lost on restart");
                    (Arc::new(InMemoryRepositoryProvider::new()), None)
                }
            };

        // ── Services ───────────────────────────────────────────
        let jwt_config = app_cfg.security.jwt_config();
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        let user_service = Arc::new(UserService::new(
            repos.clone(),
            jwt_config,
            app_cfg.security.bcrypt_cost,
        )?);
        let job_service = Arc::new(JobService::new(
            repos.clone(),
            app_cfg.jobs.enforce_ownership,
        ));
        info!(
            require_auth = app_cfg.jobs.require_auth,
            enforce_ownership = app_cfg.jobs.enforce_ownership,
            "Job endpoints configured"
        );

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(
            ApiServices {
                repos: repos.clone(),
                user_service,
                job_service,
                storage: match app_cfg.database.driver {
                    DbDriver::MongoDb => "mongodb",
                    DbDriver::Memory => "memory",
                },
            },
            &app_cfg.jobs,
            prometheus_handle,
        );

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let api_addr = app_cfg.listen_address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            mongo_client,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("Waiting for server tasks to complete...");

        let timeout = Duration::from_secs(self.shutdown.timeout_secs());
        let mut api_task = self.api_task;
        match tokio::time::timeout(timeout, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!("Shutdown timeout of {:?} elapsed, aborting API server", timeout);
                api_task.abort();
            }
        }

        if let Some(client) = self.mongo_client {
            client.shutdown().await;
            info!("MongoDB connection closed");
        }

        info!("Job board service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down job board service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process, so a
/// restart within the same process reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, recorder could not be installed: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.driver = DbDriver::Memory;
        config.security.bcrypt_cost = 4;
        config
    }

    #[tokio::test]
    async fn starts_and_stops_with_memory_store() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            ensure_indexes: false,
        })
        .await
        .unwrap();

        assert_ne!(handle.local_addr.port(), 0);
        assert!(handle.is_running());
        handle.repos.ping().await.unwrap();

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let mut config = memory_config();
        config.security.jwt_secret = String::new();

        let result = ServerHandle::start(ServerOptions {
            config,
            ensure_indexes: false,
        })
        .await;
        assert!(result.is_err());
    }
}
