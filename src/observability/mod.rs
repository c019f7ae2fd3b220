//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (operation counters, durations, site gauge)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request IDs flow through handler logs via the request-id layer
//! - Metric labels stay low-cardinality (operation and outcome only)

pub mod logging;
pub mod metrics;
