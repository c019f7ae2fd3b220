//! nginx site configuration manager library.
//!
//! Keeps a directory of reverse-proxy site configurations and a running
//! nginx in sync: configurations are created from a fixed template, enabled
//! through sites-enabled symlinks, and every mutation is followed by a
//! syntax check before the server is asked to reload.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod nginx;
pub mod observability;
pub mod sites;

pub use config::ManagerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use sites::{LifecycleCoordinator, OperationOutcome, SiteName, SiteStore, SymlinkManager};
