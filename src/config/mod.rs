//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ManagerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! On reload signal:
//!     watcher.rs detects change (or SIGHUP arrives)
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the server's inner state
//!     → handlers observe new paths/commands on their next request
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid replacement config never displaces a valid running one

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::AuthConfig;
pub use schema::ListenerConfig;
pub use schema::ManagerConfig;
pub use schema::NginxConfig;
pub use schema::ObservabilityConfig;
pub use schema::SitesConfig;
pub use schema::TemplateConfig;
