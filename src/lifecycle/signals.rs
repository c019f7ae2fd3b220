//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate signals to internal events
//!
//! # Design Decisions
//! - SIGTERM and SIGINT trigger graceful shutdown
//! - SIGHUP reloads the manager configuration from disk, not a shutdown;
//!   an invalid file keeps the running configuration
//! - Uses Tokio's signal handling (async-safe)

use std::path::PathBuf;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::ManagerConfig;
use crate::lifecycle::shutdown::Shutdown;

/// Install signal handlers and spawn the listener task.
///
/// `config_path` is None when the manager runs on built-in defaults; SIGHUP
/// is then acknowledged but has nothing to reload.
pub fn spawn_signal_listener(
    shutdown: &Shutdown,
    config_path: Option<PathBuf>,
    update_tx: mpsc::UnboundedSender<ManagerConfig>,
) -> Result<(), std::io::Error> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("SIGTERM received, shutting down");
                    shutdown.trigger();
                    break;
                }
                _ = sigint.recv() => {
                    tracing::info!("SIGINT received, shutting down");
                    shutdown.trigger();
                    break;
                }
                _ = sighup.recv() => {
                    match &config_path {
                        Some(path) => {
                            tracing::info!(path = ?path, "SIGHUP received, reloading configuration");
                            match load_config(path) {
                                Ok(config) => {
                                    let _ = update_tx.send(config);
                                }
                                Err(e) => {
                                    tracing::error!(
                                        error = %e,
                                        "Reload rejected, keeping the running configuration"
                                    );
                                }
                            }
                        }
                        None => {
                            tracing::warn!("SIGHUP received but no config file was given");
                        }
                    }
                }
            }
        }
    });

    Ok(())
}
