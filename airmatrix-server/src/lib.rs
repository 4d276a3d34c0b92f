//! Browser-facing control panel for the AirPlay matrix bridge daemon.
//!
//! Serves the control API (§ routes) plus the embedded web panel, delegating
//! all daemon interaction to [`airmatrix_supervisor::Supervisor`]. Blocking
//! supervisor calls run under `spawn_blocking`; lifecycle actions are
//! serialized through a single in-process lock.

mod error;
mod handlers;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use airmatrix_core::PlatformPaths;
use airmatrix_supervisor::Supervisor;
use tokio::net::TcpListener;

pub use error::ServerError;
pub use models::{fetch_models, OverlayModel, RegistryError};
pub use routes::router;
pub use state::AppState;

/// Default panel bind address. Loopback: API callers are unauthenticated.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:32328";

/// Default base URL of the host platform HTTP API (overlay-model registry).
pub const DEFAULT_HOST_API_BASE: &str = "http://127.0.0.1/api";

/// Control server settings, supplied by the CLI edge.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub host_api_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            host_api_base: DEFAULT_HOST_API_BASE.to_string(),
        }
    }
}

/// Control panel HTTP server.
pub struct ControlServer {
    config: ServerConfig,
    supervisor: Arc<Supervisor>,
}

impl ControlServer {
    pub fn new(config: ServerConfig, supervisor: Arc<Supervisor>) -> Self {
        Self { config, supervisor }
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr: SocketAddr =
            self.config
                .listen_addr
                .parse()
                .map_err(|source| ServerError::AddrParse {
                    addr: self.config.listen_addr.clone(),
                    source,
                })?;

        let state = AppState::new(self.supervisor, self.config.host_api_base.clone());
        let app = router(state);

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("control panel listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

/// Build a runtime and serve on the current thread until shutdown.
pub fn start_blocking(config: ServerConfig, paths: PlatformPaths) -> Result<(), ServerError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let supervisor = Arc::new(Supervisor::new(paths));
    runtime.block_on(ControlServer::new(config, supervisor).run())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received ctrl-c, shutting down control panel"),
        Err(err) => tracing::warn!(error = %err, "ctrl-c handler failed"),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
