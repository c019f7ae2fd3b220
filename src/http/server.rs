//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, body limit, request ID, auth)
//! - Hold the swappable application state
//! - Apply configuration updates without dropping in-flight requests
//!
//! # Design Decisions
//! - State lives behind an ArcSwap: a config reload builds a fresh inner
//!   (new paths, commands, timeouts) and swaps it in atomically; running
//!   requests keep the inner they loaded
//! - Graceful shutdown rides the crate-wide broadcast channel

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ManagerConfig;
use crate::http::auth::require_api_key;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::nginx::logs::AccessLogReader;
use crate::nginx::runner::CommandRunner;
use crate::nginx::status::StatusClient;
use crate::sites::{LifecycleCoordinator, SiteStore, SymlinkManager};

/// Everything a request handler needs, built from one config snapshot.
pub struct AppInner {
    pub config: ManagerConfig,
    pub coordinator: LifecycleCoordinator<CommandRunner>,
    pub status: StatusClient,
    pub logs: AccessLogReader,
}

impl AppInner {
    pub fn from_config(config: ManagerConfig) -> Self {
        let store = SiteStore::new(&config.sites.available_dir);
        let symlinks = SymlinkManager::new(&config.sites.enabled_dir);
        let runner = CommandRunner::new(&config.nginx);
        let coordinator =
            LifecycleCoordinator::new(store, symlinks, runner, config.template.clone());
        let status = StatusClient::new(&config.nginx);
        let logs = AccessLogReader::new(&config.template.log_dir);

        Self {
            config,
            coordinator,
            status,
            logs,
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<AppInner>>,
}

/// HTTP server for the site manager API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ManagerConfig) -> Self {
        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(AppInner::from_config(config))),
        };
        let router = Self::build_router(state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let inner = state.inner.load();
        let request_timeout = Duration::from_secs(inner.config.listener.request_timeout_secs);
        let max_body_bytes = inner.config.listener.max_body_bytes;
        drop(inner);

        Router::new()
            .route(
                "/sites",
                get(handlers::list_sites).post(handlers::create_site),
            )
            .route(
                "/sites/{name}",
                get(handlers::get_site)
                    .put(handlers::update_site)
                    .delete(handlers::delete_site),
            )
            .route("/status", get(handlers::nginx_status))
            .route("/logs/{name}", get(handlers::site_logs))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            ))
            .with_state(state)
            .layer(
                // First layer here is outermost: the request ID is stamped
                // before tracing sees the request and propagated onto the
                // response after everything else ran.
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(DefaultBodyLimit::max(max_body_bytes)),
            )
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Configuration updates (file watcher, SIGHUP) arrive on
    /// `config_updates` and swap the application state atomically.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ManagerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "API server starting");

        let swap_state = self.state.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                tracing::info!(
                    available_dir = %new_config.sites.available_dir,
                    enabled_dir = %new_config.sites.enabled_dir,
                    "Applying updated manager configuration"
                );
                swap_state
                    .inner
                    .store(Arc::new(AppInner::from_config(new_config)));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("API server stopped");
        Ok(())
    }

    /// Get a handle to the application state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }
}
