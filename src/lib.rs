//! Route versioning for axum applications.
//!
//! Routes are declared on an [`ApiApp`], tagged with a version either one by
//! one ([`version`]) or through a route class ([`versioned_api_route`]), then
//! regrouped by [`versioned_app`] into one sub-application per version,
//! each mounted under its own prefix with its own OpenAPI document.
//!
//! ```ignore
//! let app = ApiApp::new("Shop")
//!     .route(ApiRoute::get("/items", list_items))
//!     .route(version(2, 0).apply(ApiRoute::get("/items", list_items_v2)));
//!
//! let router = versioned_app(app, &VersioningConfig::default())?.into_router()?;
//! // GET /v1_0/items → list_items, GET /v2_0/items → list_items_v2
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod openapi;
pub mod routing;
pub mod versioning;

pub use config::{ServiceConfig, VersioningConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ApiApp, ApiRoute, ApiRouter, RouteClass};
pub use versioning::{
    version, version_major, versioned_api_route, versioned_app, ApiVersion, VersionTag,
    VersionedApi, VersioningError,
};
