//! Route versioning subsystem.
//!
//! # Data Flow
//! ```text
//! ApiRoute[] (tagged with version()/versioned_api_route(), or untagged)
//!     → mount.rs (resolve tag, bucket by (major, minor, prefix), sort)
//!     → format.rs (render mount prefix and version string)
//!     → one ApiApp per bucket, routes carried forward across versions
//!     → VersionedApi::into_router (nest under each prefix, optional /latest)
//! ```

pub mod error;
pub mod format;
pub mod mount;
pub mod route_class;
pub mod version;

pub use crate::config::schema::VersioningConfig;
pub use error::VersioningError;
pub use format::format_version;
pub use mount::{versioned_app, MountedVersion, VersionedApi};
pub use route_class::{versioned_api_route, versioned_api_route_with, VersionedRouteClass};
pub use version::{version, version_major, ApiVersion, VersionTag};
