//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: database connection,
//! migrations, default administrator, REST API, metrics and graceful
//! shutdown. The CLI binary and `src/main.rs` both start the service
//! through it.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::IdentityService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::{create_api_router, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the administrator when the volunteer table is empty (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running pep-admin service.
///
/// ```rust,no_run
/// use pep_admin::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub identity: Arc<IdentityService>,
    pub config: AppConfig,
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can be installed once per process; a restart
/// within the same process reuses it.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                warn!("Prometheus recorder not installed ({}), /metrics stays empty", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

/// SQLite creates the file but not its directory.
fn ensure_sqlite_dir(url: &str) -> std::io::Result<()> {
    let Some(rest) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }
    match Path::new(path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed the administrator (if enabled)
    /// 4. Serve the REST API with Swagger UI
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting pep-admin...");

        let prometheus = prometheus_handle();

        let db_config = DatabaseConfig {
            url: app_cfg.database.connection_url(),
            max_connections: app_cfg.database.max_connections,
        };
        ensure_sqlite_dir(&db_config.url)?;

        let jwt_config = JwtConfig {
            secret: app_cfg.security.jwt_secret.clone(),
            expiration_hours: app_cfg.security.jwt_expiration_hours,
            issuer: "pep-admin".to_string(),
        };
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        // ── Database ───────────────────────────────────────────
        let db = init_database(&db_config).await?;

        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let identity = Arc::new(IdentityService::new(repos.clone(), jwt_config));

        if opts.create_default_admin {
            match identity.ensure_default_admin(&app_cfg.admin).await {
                Ok(true) => {
                    info!("Default admin created: {}", app_cfg.admin.email);
                    info!("⚠️  Please change the admin password immediately!");
                }
                Ok(false) => {}
                Err(e) => error!("Failed to create admin volunteer: {}", e),
            }
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(repos.clone(), identity.clone(), db.clone(), prometheus);

        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let api_port = listener.local_addr()?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 pep-admin started.");

        Ok(Self {
            repos,
            identity,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGTERM/SIGINT listeners that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for in-flight requests to drain, then close the database.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        match tokio::time::timeout(self.shutdown.timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!(
                "REST API server did not stop within {:?}",
                self.shutdown.timeout()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 pep-admin shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("🛑 Shutting down pep-admin...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once, before
/// [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".into();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = format!(
            "sqlite://{}?mode=rwc",
            dir.join("nested").join("pep.db").display()
        );
        config.security.jwt_secret = "server-test".into();
        config
    }

    #[test]
    fn sqlite_directory_is_created() {
        let dir = std::env::temp_dir().join(format!("pep-admin-dir-{}", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}/data/pep.db?mode=rwc", dir.display());
        ensure_sqlite_dir(&url).unwrap();
        assert!(dir.join("data").is_dir());
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(ensure_sqlite_dir("sqlite::memory:").is_ok());
        assert!(ensure_sqlite_dir("postgres://localhost/pep").is_ok());
    }

    #[tokio::test]
    async fn starts_seeds_admin_and_stops() {
        let dir = std::env::temp_dir().join(format!("pep-admin-srv-{}", uuid::Uuid::new_v4()));
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(&dir),
            ..ServerOptions::default()
        })
        .await
        .unwrap();

        assert!(handle.api_port > 0);
        assert!(handle.is_running());
        assert_eq!(handle.repos.volunteers().count().await.unwrap(), 1);

        handle.shutdown().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
