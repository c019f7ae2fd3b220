//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID), auth.rs (Bearer check)
//!     → handlers.rs (decode params/body, call into sites/nginx)
//!     → pagination.rs (list narrowing, pure)
//!     → JSON response (OperationOutcome or view structs)
//! ```

pub mod auth;
pub mod handlers;
pub mod pagination;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
