//! Interface to the managed nginx process.
//!
//! # Data Flow
//! ```text
//! coordinator
//!     → runner.rs (spawn check command; on success, spawn reload command)
//!     → ValidationResult / ReloadResult back to the coordinator
//!
//! status handler
//!     → status.rs (fetch stub_status text, split lines)
//! logs handler
//!     → logs.rs (read per-site access log)
//! ```
//!
//! # Design Decisions
//! - Command failures never crash the caller: a checker that cannot launch
//!   is a failed validation, not an error
//! - Every external invocation is bounded by a timeout; expiry is failure
//! - Reload is only ever attempted after a successful validation

pub mod logs;
pub mod runner;
pub mod status;

pub use runner::{CommandRunner, NginxController, ReloadResult, ValidationResult};
