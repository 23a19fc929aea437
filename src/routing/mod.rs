//! Route declaration subsystem.
//!
//! # Data Flow
//! ```text
//! handler fn
//!     → route.rs (ApiRoute: path, methods, docs fields, version tag)
//!     → router.rs (ApiRouter: prefix, tags, route class)
//!     → app.rs (ApiApp: routes + OpenAPI → axum::Router)
//! ```
//!
//! # Design Decisions
//! - Declaration and assembly are separate so routes can be regrouped
//!   (per version) before any axum router exists
//! - Assembly happens once; the axum router is immutable afterwards

pub mod app;
pub mod route;
pub mod router;

pub use app::ApiApp;
pub use route::{ApiRoute, Endpoint};
pub use router::{ApiRouter, DefaultRouteClass, RouteClass};
