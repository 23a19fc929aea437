//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum serve, middleware)
//!     → versioned router (nested per version prefix)
//!     → handler
//! ```

pub mod server;

pub use server::HttpServer;
