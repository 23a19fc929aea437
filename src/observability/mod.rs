//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! versioning / http subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (gauges, counters)
//! ```

pub mod logging;
pub mod metrics;
