//! OpenAPI document generation and docs UI.
//!
//! # Data Flow
//! ```text
//! ApiApp routes (+ documented aliases)
//!     → OperationInfo[]
//!     → builder.rs (OpenAPI 3.1 JSON)
//!     → docs.rs (`/openapi.json` + Swagger UI page)
//! ```

pub mod builder;
pub mod docs;

pub use builder::{build_spec, OpenApiConfig, OperationInfo};
pub use docs::{docs_html, openapi_routes};
