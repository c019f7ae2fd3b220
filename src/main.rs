//! nginx site configuration manager.
//!
//! Manages one file per site under sites-available, one symlink per enabled
//! site under sites-enabled, and keeps the running nginx synchronized with
//! them through validate-then-reload.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │               SITE MANAGER                     │
//!   API Request     │  ┌────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ────────────────┼─▶│  http  │──▶│  sites   │──▶│ store +     │  │
//!                   │  │ server │   │coordinator│  │ symlinks    │──┼──▶ sites-available/
//!                   │  └────────┘   └────┬─────┘   └─────────────┘  │    sites-enabled/
//!                   │                    │                           │
//!                   │                    ▼                           │
//!                   │              ┌──────────┐    validate, reload  │
//!                   │              │  nginx   │──────────────────────┼──▶ nginx -t
//!                   │              │  runner  │                      │    systemctl reload nginx
//!                   │              └──────────┘                      │
//!                   │  ┌──────────────────────────────────────────┐ │
//!                   │  │ config (TOML + watcher) · observability  │ │
//!                   │  │ lifecycle (signals, graceful shutdown)   │ │
//!                   │  └──────────────────────────────────────────┘ │
//!                   └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tokio::net::TcpListener;

use nginx_site_manager::config::loader::load_config;
use nginx_site_manager::config::watcher::ConfigWatcher;
use nginx_site_manager::config::ManagerConfig;
use nginx_site_manager::http::HttpServer;
use nginx_site_manager::lifecycle::signals::spawn_signal_listener;
use nginx_site_manager::lifecycle::Shutdown;
use nginx_site_manager::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // First positional argument is the config file; defaults apply without one.
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ManagerConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        available_dir = %config.sites.available_dir,
        enabled_dir = %config.sites.enabled_dir,
        "nginx-site-manager starting"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for API requests");

    let shutdown = Shutdown::new();

    // Config updates flow in from the file watcher and from SIGHUP.
    let (update_tx, update_rx) = tokio::sync::mpsc::unbounded_channel();

    // Keep the watcher handle alive for the lifetime of the process.
    let _watcher = match &config_path {
        Some(path) => {
            let (watcher, mut watcher_rx) = ConfigWatcher::new(path);
            let tx = update_tx.clone();
            tokio::spawn(async move {
                while let Some(config) = watcher_rx.recv().await {
                    let _ = tx.send(config);
                }
            });
            Some(watcher.run()?)
        }
        None => None,
    };

    spawn_signal_listener(&shutdown, config_path, update_tx)?;

    let server = HttpServer::new(config);
    server.run(listener, update_rx, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
