//! Site configuration lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! caller (HTTP handler / CLI)
//!     → coordinator.rs (sequences the operation, holds the per-name lock)
//!     → store.rs (file content under sites-available)
//!     → symlink.rs (enable link under sites-enabled)
//!     → nginx runner (validate, then reload)
//!     → OperationOutcome back to the caller
//! ```
//!
//! # Design Decisions
//! - Names are validated once at the boundary (`SiteName`); raw strings
//!   never reach path construction
//! - The store owns file content, the symlink manager owns the enable link;
//!   the coordinator owns no storage, only ordering
//! - Delete removes the enable link before the file so the nginx tree never
//!   contains a dangling reference
//! - No rollback on failed validation; outcomes report exactly what changed

pub mod coordinator;
pub mod name;
pub mod store;
pub mod symlink;
pub mod template;
pub mod types;

pub use coordinator::LifecycleCoordinator;
pub use name::SiteName;
pub use store::SiteStore;
pub use symlink::SymlinkManager;
pub use types::{OperationOutcome, SiteError, SiteResult};
